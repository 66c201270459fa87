//! # ref-selector
//!
//! Reference selection for viral consensus pipelines.
//!
//! After reads are mapped against a database of candidate reference genomes with
//! BBMap, its `covstats` table says how well each reference is covered. This
//! crate turns that table into a decision:
//!
//! - every reference with enough median coverage and covered percent is kept,
//!   one per reference tag (species or group), and appended to `<sample>_refs.tsv`
//! - if none qualifies, the best-covered reference and the spread of mapped
//!   reads over tags are written to `<sample>_failed_assembly.tsv`
//!
//! Failed-assembly records can later be folded into a run-wide summary table
//! with the [`merge`] module.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ref_selector::{parse_covstats_file, ReferenceSelector, SampleReads, Selection, Thresholds};
//! use std::path::Path;
//!
//! let records = parse_covstats_file(Path::new("S1_covstats.tsv")).unwrap();
//! let selector = ReferenceSelector::new(Thresholds::new(3, 70.0));
//! let sample = SampleReads::new("S1", 120_000, 118_500);
//!
//! if let Selection::Selected { references } = selector.select(&records, &sample).unwrap() {
//!     for r in references {
//!         println!("{}\t{}", r.accession, r.tag);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Coverage records, thresholds and result types
//! - [`parsing`]: BBMap `covstats` parser
//! - [`selection`]: Selection engine and read distribution
//! - [`output`]: Writers for the per-sample result tables
//! - [`merge`]: Merging failed-assembly records into a run summary
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod merge;
pub mod output;
pub mod parsing;
pub mod selection;

// Re-export commonly used types for convenience
pub use core::record::{CoverageRecord, ReferenceName};
pub use core::report::{FailedAssemblyRecord, SelectedReference, Selection};
pub use core::types::Thresholds;
pub use parsing::covstats::parse_covstats_file;
pub use selection::engine::{ReferenceSelector, SampleReads};
