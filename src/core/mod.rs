//! Core data types for reference selection.
//!
//! - [`CoverageRecord`](record::CoverageRecord): one row of a BBMap `covstats` table
//! - [`ReferenceName`](record::ReferenceName): accession, tag and description split out of a row id
//! - [`Thresholds`](types::Thresholds): minimum median coverage and covered percent
//! - [`SelectedReference`](report::SelectedReference), [`FailedAssemblyRecord`](report::FailedAssemblyRecord):
//!   the two possible per-sample outputs
//!
//! ## Reference identifiers
//!
//! The first `covstats` column holds the full FASTA header of the reference:
//!
//! ```text
//! MN908947.3 SARS-CoV-2 Wuhan-Hu-1, complete genome
//! ^accession ^tag       ^description
//! ```
//!
//! References sharing a tag are variants of one species or group, and at most
//! one reference per tag is ever selected.

pub mod record;
pub mod report;
pub mod types;
