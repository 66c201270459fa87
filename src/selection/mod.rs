//! Reference selection from coverage statistics.
//!
//! A reference passes when its median coverage and covered percent both reach
//! the [`Thresholds`](crate::core::types::Thresholds). The outcome for a sample is
//! one of:
//!
//! - **Selected**: the passing references, deduplicated by tag (first passing
//!   row per tag wins)
//! - **Failed**: stats of the reference with the highest covered percent, the
//!   distribution of mapped reads over tags, and how many reads trimming removed
//!
//! ## Example
//!
//! ```rust,no_run
//! use ref_selector::core::report::Selection;
//! use ref_selector::core::types::Thresholds;
//! use ref_selector::parsing::covstats::parse_covstats_file;
//! use ref_selector::selection::engine::{ReferenceSelector, SampleReads};
//! use std::path::Path;
//!
//! let records = parse_covstats_file(Path::new("S1_covstats.tsv")).unwrap();
//! let selector = ReferenceSelector::new(Thresholds::default());
//!
//! match selector.select(&records, &SampleReads::new("S1", 120_000, 118_500)).unwrap() {
//!     Selection::Selected { references } => println!("{} references", references.len()),
//!     Selection::Failed { record } => println!("failed: {}", record.reads_distribution),
//! }
//! ```

use thiserror::Error;

use crate::parsing::covstats::ParseError;

pub mod distribution;
pub mod engine;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("raw read count is zero; cannot compute percent of reads trimmed")]
    ZeroRawReads,

    #[error(transparent)]
    Parse(#[from] ParseError),
}
