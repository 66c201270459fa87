use serde::{Deserialize, Serialize};

use crate::core::record::{columns, CoverageRecord, ReferenceName};

/// Header of the failed-assembly table
pub const FAILED_ASSEMBLY_HEADER: [&str; 11] = [
    "sample_name",
    "ref_best_cov",
    "average_coverage",
    "covered_percent",
    "plus_reads",
    "minus_reads",
    "median_coverage",
    "reads_distribution",
    "raw_reads",
    "trimmed_reads",
    "pct_reads_trimmed",
];

/// Placeholder written for every stat when no read mapped anywhere
pub const NO_MAPPING: &str = "0";

/// A reference chosen for consensus calling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedReference {
    pub accession: String,
    pub tag: String,
    pub description: String,
}

impl SelectedReference {
    /// Render as a `_refs.tsv` line, without the trailing newline
    #[must_use]
    pub fn to_tsv_line(&self) -> String {
        format!("{}\t{}\t{}", self.accession, self.tag, self.description)
    }
}

impl From<ReferenceName> for SelectedReference {
    fn from(name: ReferenceName) -> Self {
        Self {
            accession: name.accession,
            tag: name.tag,
            description: name.description,
        }
    }
}

/// Mapped reads summed per reference tag, most reads first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadDistribution {
    pub entries: Vec<(String, u64)>,
}

impl ReadDistribution {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for ReadDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (tag, reads)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{tag}: {reads}")?;
        }
        Ok(())
    }
}

/// Coverage stats of the best-covered reference, echoed verbatim from the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestCoverageStats {
    pub ref_best_cov: String,
    pub average_coverage: String,
    pub covered_percent: String,
    pub plus_reads: String,
    pub minus_reads: String,
    pub median_coverage: String,
}

impl BestCoverageStats {
    #[must_use]
    pub fn from_record(record: &CoverageRecord) -> Self {
        let [id, avg, pct, plus, minus, median] =
            columns::BEST_COVERAGE_STATS.map(|c| record.raw(c).to_string());
        Self {
            ref_best_cov: id,
            average_coverage: avg,
            covered_percent: pct,
            plus_reads: plus,
            minus_reads: minus,
            median_coverage: median,
        }
    }

    /// Stats for a sample where nothing mapped
    #[must_use]
    pub fn unmapped() -> Self {
        Self {
            ref_best_cov: NO_MAPPING.to_string(),
            average_coverage: NO_MAPPING.to_string(),
            covered_percent: NO_MAPPING.to_string(),
            plus_reads: NO_MAPPING.to_string(),
            minus_reads: NO_MAPPING.to_string(),
            median_coverage: NO_MAPPING.to_string(),
        }
    }

    fn fields(&self) -> [&str; 6] {
        [
            &self.ref_best_cov,
            &self.average_coverage,
            &self.covered_percent,
            &self.plus_reads,
            &self.minus_reads,
            &self.median_coverage,
        ]
    }
}

/// Diagnostic record for a sample where no reference passed the thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedAssemblyRecord {
    pub sample_name: String,
    pub best: BestCoverageStats,
    pub reads_distribution: String,
    pub raw_reads: u64,
    pub trimmed_reads: u64,
    pub pct_reads_trimmed: f64,
}

impl FailedAssemblyRecord {
    /// Header line of the failed-assembly table, without the trailing newline
    #[must_use]
    pub fn header_line() -> String {
        FAILED_ASSEMBLY_HEADER.join("\t")
    }

    /// The record's data line, without the trailing newline
    #[must_use]
    pub fn to_tsv_line(&self) -> String {
        let mut fields: Vec<String> = Vec::with_capacity(FAILED_ASSEMBLY_HEADER.len());
        fields.push(self.sample_name.clone());
        fields.extend(self.best.fields().iter().map(ToString::to_string));
        fields.push(self.reads_distribution.clone());
        fields.push(self.raw_reads.to_string());
        fields.push(self.trimmed_reads.to_string());
        fields.push(format_percent(self.pct_reads_trimmed));
        fields.join("\t")
    }
}

/// Format a percentage the shortest way that round-trips, always with a
/// fractional part (`20.0`, `33.33`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:?}")
}

/// Outcome of reference selection for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Selection {
    /// At least one reference passed; one entry per distinct tag
    Selected { references: Vec<SelectedReference> },
    /// No reference passed
    Failed { record: FailedAssemblyRecord },
}
