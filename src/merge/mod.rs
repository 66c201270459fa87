//! Merging failed-assembly records into a run summary.
//!
//! Samples that fail reference selection never reach consensus calling, so
//! they are missing from the run summary. The merger reads their
//! `_failed_assembly.tsv` records (usually concatenated across samples),
//! splits the composite `ref_best_cov` column into `ref_acc`, `ref_tag` and
//! `ref_header`, and appends each row to the summary using the summary's own
//! column order. Columns the failed row does not have are left empty.

use thiserror::Error;

pub mod failed;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Run summary has no header row: {0}")]
    MissingHeader(String),
}
