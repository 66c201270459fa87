//! Parser for BBMap `covstats` tables.
//!
//! The table is tab-separated with one header line. Columns are addressed by
//! position; the ones used here are:
//!
//! | Column | BBMap name | Used as |
//! |--------|------------|---------|
//! | 0 | `#ID` | reference identifier |
//! | 1 | `Avg_fold` | average coverage |
//! | 4 | `Covered_percent` | covered percent |
//! | 6 | `Plus_reads` | plus-strand reads |
//! | 7 | `Minus_reads` | minus-strand reads |
//! | 9 | `Median_fold` | median coverage |

use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::core::record::{columns, CoverageRecord};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("covstats table is empty (no header line)")]
    MissingHeader,

    #[error("Line {line} has {found} columns, expected at least {min}", min = columns::MIN_COLUMNS)]
    TooFewColumns { line: usize, found: usize },

    #[error("Invalid number in column {column} on line {line}: '{value}'")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("Reference id on line {line} has no tag: '{id}'")]
    MissingTag { line: usize, id: String },
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a `covstats` file, plain or gzip/bgzip compressed.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any of the row
/// errors from [`parse_covstats_text`].
pub fn parse_covstats_file(path: &Path) -> Result<Vec<CoverageRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut text = String::new();

    if is_gzipped(path) {
        debug!("Reading gzipped covstats from {}", path.display());
        MultiGzDecoder::new(BufReader::new(file)).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }

    parse_covstats_text(&text)
}

/// Parse `covstats` text. The first line is the header and is skipped.
///
/// # Errors
///
/// Returns `ParseError::MissingHeader` for empty input, `ParseError::TooFewColumns`
/// for rows with fewer than ten columns, or `ParseError::InvalidNumber` when a
/// numeric column does not parse.
pub fn parse_covstats_text(text: &str) -> Result<Vec<CoverageRecord>, ParseError> {
    let mut lines = text.lines().enumerate();

    if lines.next().is_none() {
        return Err(ParseError::MissingHeader);
    }

    let mut records = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        // Line numbers in errors are 1-based for user friendliness
        records.push(parse_row(line, i + 1)?);
    }

    debug!("Parsed {} covstats rows", records.len());
    Ok(records)
}

fn parse_row(line: &str, line_num: usize) -> Result<CoverageRecord, ParseError> {
    let fields: Vec<String> = line.split('\t').map(str::to_string).collect();

    if fields.len() < columns::MIN_COLUMNS {
        return Err(ParseError::TooFewColumns {
            line: line_num,
            found: fields.len(),
        });
    }

    Ok(CoverageRecord {
        line: line_num,
        id: fields[columns::ID].clone(),
        average_coverage: parse_number(&fields, columns::AVERAGE_COVERAGE, line_num)?,
        covered_percent: parse_number(&fields, columns::COVERED_PERCENT, line_num)?,
        plus_reads: parse_number(&fields, columns::PLUS_READS, line_num)?,
        minus_reads: parse_number(&fields, columns::MINUS_READS, line_num)?,
        median_coverage: parse_number(&fields, columns::MEDIAN_COVERAGE, line_num)?,
        fields,
    })
}

fn parse_number<T: FromStr>(fields: &[String], column: usize, line: usize) -> Result<T, ParseError> {
    let value = fields[column].trim();
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    })
}
