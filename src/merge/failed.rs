use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::merge::MergeError;

/// Composite "accession tag description" column of a failed-assembly record
pub const REF_BEST_COV: &str = "ref_best_cov";
pub const REF_ACC: &str = "ref_acc";
pub const REF_TAG: &str = "ref_tag";
pub const REF_HEADER: &str = "ref_header";

/// One failed-assembly row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailedRun {
    fields: HashMap<String, String>,
}

impl FailedRun {
    /// Build a row from header/value pairs, then add the `ref_acc`, `ref_tag`
    /// and `ref_header` columns split out of `ref_best_cov`.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let (acc, tag, header) = split_ref_best_cov(fields.get(REF_BEST_COV).map(String::as_str));
        fields.insert(REF_ACC.to_string(), acc);
        fields.insert(REF_TAG.to_string(), tag);
        fields.insert(REF_HEADER.to_string(), header);

        Self { fields }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Project the row onto `header`. Columns the row lacks become empty cells.
    /// Returns `None` when the row has none of the header's columns.
    #[must_use]
    pub fn project(&self, header: &[String]) -> Option<Vec<String>> {
        if !header.iter().any(|h| self.fields.contains_key(h)) {
            return None;
        }

        Some(
            header
                .iter()
                .map(|h| self.get(h).unwrap_or_default().to_string())
                .collect(),
        )
    }
}

/// Split "accession tag description" on the first two spaces. Missing parts
/// are left empty, which covers the all-"0" record of an unmapped sample.
fn split_ref_best_cov(value: Option<&str>) -> (String, String, String) {
    let Some(value) = value else {
        return (String::new(), String::new(), String::new());
    };

    let mut parts = value.splitn(3, ' ').map(str::to_string);
    (
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    )
}

/// Read all rows of a failed-assembly table (tab separated, with header).
///
/// # Errors
///
/// Returns `MergeError::Csv` if the file cannot be opened or parsed.
pub fn read_failed_runs(path: &Path) -> Result<Vec<FailedRun>, MergeError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut runs = Vec::new();
    for result in reader.records() {
        let record = result?;
        let run = FailedRun::new(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h, record.get(i).unwrap_or_default())),
        );
        debug!("Failed run: {:?}", run.get(REF_BEST_COV));
        runs.push(run);
    }

    Ok(runs)
}

/// Read the header row of the run summary.
///
/// # Errors
///
/// Returns `MergeError::MissingHeader` if the summary has no rows, or
/// `MergeError::Csv` if it cannot be read.
pub fn read_summary_header(path: &Path) -> Result<Vec<String>, MergeError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(MergeError::MissingHeader(path.display().to_string()));
    }

    Ok(record.iter().map(str::to_string).collect())
}

/// Append failed-assembly rows to the run summary, restricted to the summary's
/// columns. Returns the number of rows written.
///
/// # Errors
///
/// Returns an error if either file cannot be read, the summary has no header,
/// or the summary cannot be appended to.
pub fn merge_failed_runs(run_summary: &Path, failed_runs: &Path) -> Result<usize, MergeError> {
    let runs = read_failed_runs(failed_runs)?;
    let header = read_summary_header(run_summary)?;
    debug!("Run summary columns: {}", header.join(", "));

    let mut file = OpenOptions::new().read(true).append(true).open(run_summary)?;
    if !ends_with_newline(&mut file)? {
        file.write_all(b"\n")?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(file);

    let mut merged = 0;
    for run in &runs {
        if let Some(row) = run.project(&header) {
            debug!("Merging row: {}", row.join(" | "));
            writer.write_record(&row)?;
            merged += 1;
        }
    }
    writer.flush()?;

    info!(
        "Merged {merged} of {} failed run(s) into {}",
        runs.len(),
        run_summary.display()
    );
    Ok(merged)
}

/// Whether the file is empty or its last byte is a newline
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
