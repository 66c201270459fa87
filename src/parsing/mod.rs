//! Parsers for coverage statistics tables.
//!
//! Currently this covers BBMap `covstats` output (`bbmap.sh covstats=...`),
//! plain or gzip compressed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ref_selector::parsing::covstats::parse_covstats_file;
//! use std::path::Path;
//!
//! let records = parse_covstats_file(Path::new("sample_covstats.tsv")).unwrap();
//! for r in &records {
//!     println!("{}: {}% covered", r.id, r.covered_percent);
//! }
//! ```

pub mod covstats;
