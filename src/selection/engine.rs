use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::core::record::CoverageRecord;
use crate::core::report::{
    BestCoverageStats, FailedAssemblyRecord, SelectedReference, Selection, NO_MAPPING,
};
use crate::core::types::Thresholds;
use crate::selection::distribution::read_distribution;
use crate::selection::SelectionError;

/// Per-sample read counts reported alongside a failed assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReads {
    pub sample_name: String,
    pub raw_reads: u64,
    pub trimmed_reads: u64,
}

impl SampleReads {
    pub fn new(sample_name: impl Into<String>, raw_reads: u64, trimmed_reads: u64) -> Self {
        Self {
            sample_name: sample_name.into(),
            raw_reads,
            trimmed_reads,
        }
    }
}

/// Decides which references a sample's consensus should be called against
pub struct ReferenceSelector {
    thresholds: Thresholds,
}

impl ReferenceSelector {
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Select references from parsed `covstats` rows.
    ///
    /// Returns `Selection::Selected` with one reference per distinct tag when any
    /// row passes the thresholds, otherwise `Selection::Failed` with diagnostics
    /// about the best-covered reference.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Parse` if a reference id needed for the decision
    /// has no tag, or `SelectionError::ZeroRawReads` if no reference passes and
    /// the sample has zero raw reads.
    pub fn select(
        &self,
        records: &[CoverageRecord],
        sample: &SampleReads,
    ) -> Result<Selection, SelectionError> {
        let passing: Vec<&CoverageRecord> = records
            .iter()
            .filter(|r| self.thresholds.passes(r))
            .collect();

        debug!(
            "{} of {} references pass ({})",
            passing.len(),
            records.len(),
            self.thresholds
        );

        if passing.is_empty() {
            let record = self.failed_assembly(records, sample)?;
            return Ok(Selection::Failed { record });
        }

        let references = dedup_by_tag(&passing)?;
        info!(
            "Selected {} reference(s) for {}",
            references.len(),
            sample.sample_name
        );
        Ok(Selection::Selected { references })
    }

    fn failed_assembly(
        &self,
        records: &[CoverageRecord],
        sample: &SampleReads,
    ) -> Result<FailedAssemblyRecord, SelectionError> {
        let mapped = mapped_references(records);

        let (best, reads_distribution) = match mapped.first() {
            Some(best) => {
                debug!(
                    "Best covered reference: {} ({}%)",
                    best.id, best.covered_percent
                );
                let distribution = read_distribution(&mapped)?;
                (BestCoverageStats::from_record(best), distribution.to_string())
            }
            None => {
                warn!("No reads mapped to any reference for {}", sample.sample_name);
                (BestCoverageStats::unmapped(), NO_MAPPING.to_string())
            }
        };

        let pct_reads_trimmed = pct_reads_trimmed(sample.raw_reads, sample.trimmed_reads)?;

        info!(
            "No reference passed ({}); reporting failed assembly for {}",
            self.thresholds, sample.sample_name
        );

        Ok(FailedAssemblyRecord {
            sample_name: sample.sample_name.clone(),
            best,
            reads_distribution,
            raw_reads: sample.raw_reads,
            trimmed_reads: sample.trimmed_reads,
            pct_reads_trimmed,
        })
    }
}

/// Keep the first passing reference for each tag, in input order
fn dedup_by_tag(passing: &[&CoverageRecord]) -> Result<Vec<SelectedReference>, SelectionError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut references = Vec::new();

    for record in passing {
        let name = record.reference_name()?;
        if seen.insert(name.tag.clone()) {
            references.push(SelectedReference::from(name));
        } else {
            debug!("Skipping {}: tag '{}' already selected", name.accession, name.tag);
        }
    }

    Ok(references)
}

/// References with any coverage, highest covered percent first.
///
/// The sort is stable, so references with equal coverage keep their table order.
fn mapped_references(records: &[CoverageRecord]) -> Vec<&CoverageRecord> {
    let mut sorted: Vec<&CoverageRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.covered_percent.total_cmp(&a.covered_percent));
    sorted
        .into_iter()
        .take_while(|r| r.covered_percent > 0.0)
        .collect()
}

/// Percent of raw reads removed by trimming, rounded to two decimals.
///
/// Rounding goes through the fixed-precision formatter, which rounds the exact
/// binary value half to even, so `3.125` becomes `3.12`.
///
/// # Errors
///
/// Returns `SelectionError::ZeroRawReads` if `raw_reads` is zero.
#[allow(clippy::cast_precision_loss)] // Read counts are far below 2^52
pub fn pct_reads_trimmed(raw_reads: u64, trimmed_reads: u64) -> Result<f64, SelectionError> {
    if raw_reads == 0 {
        return Err(SelectionError::ZeroRawReads);
    }

    let removed = raw_reads as f64 - trimmed_reads as f64;
    let pct = removed / raw_reads as f64 * 100.0;
    // A finite f64 always re-parses from its own formatting
    Ok(format!("{pct:.2}").parse().unwrap_or(pct))
}
