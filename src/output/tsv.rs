use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::report::{FailedAssemblyRecord, SelectedReference, Selection};

/// Suffix of the selected-references table
pub const REFS_SUFFIX: &str = "_refs.tsv";

/// Suffix of the failed-assembly table
pub const FAILED_ASSEMBLY_SUFFIX: &str = "_failed_assembly.tsv";

/// Output path for a sample: `<outdir>/<basename><suffix>`, or relative to the
/// working directory when no `outdir` is given.
#[must_use]
pub fn output_path(outdir: Option<&Path>, basename: &str, suffix: &str) -> PathBuf {
    let name = format!("{basename}{suffix}");
    match outdir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Append selected references to `path`, creating it if needed. No header is
/// written, so repeated runs accumulate rows.
///
/// # Errors
///
/// Returns any I/O error from opening, writing or flushing the file.
pub fn append_selected_references(path: &Path, references: &[SelectedReference]) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);

    for reference in references {
        writeln!(writer, "{}", reference.to_tsv_line())?;
    }

    writer.flush()
}

/// Write the failed-assembly table to `path`, replacing any previous content.
/// The data row ends in a tab after its last column.
///
/// # Errors
///
/// Returns any I/O error from creating, writing or flushing the file.
pub fn write_failed_assembly(path: &Path, record: &FailedAssemblyRecord) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "{}", FailedAssemblyRecord::header_line())?;
    writeln!(writer, "{}\t", record.to_tsv_line())?;

    writer.flush()
}

/// Empty the failed-assembly table for a sample, creating it if needed, and
/// return its path.
///
/// # Errors
///
/// Returns any I/O error from creating the file.
pub fn truncate_failed_assembly(basename: &str, outdir: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = output_path(outdir, basename, FAILED_ASSEMBLY_SUFFIX);
    File::create(&path)?;
    Ok(path)
}

/// Write whichever table the selection calls for and return its path.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_selection(
    selection: &Selection,
    basename: &str,
    outdir: Option<&Path>,
) -> std::io::Result<PathBuf> {
    match selection {
        Selection::Selected { references } => {
            let path = output_path(outdir, basename, REFS_SUFFIX);
            debug!("Appending {} reference(s) to {}", references.len(), path.display());
            append_selected_references(&path, references)?;
            Ok(path)
        }
        Selection::Failed { record } => {
            let path = output_path(outdir, basename, FAILED_ASSEMBLY_SUFFIX);
            debug!("Writing failed assembly record to {}", path.display());
            write_failed_assembly(&path, record)?;
            Ok(path)
        }
    }
}
