use serde::{Deserialize, Serialize};

use crate::core::record::CoverageRecord;

/// Default minimum median fold coverage for a reference to be selected
pub const DEFAULT_MIN_MEDIAN: i64 = 3;

/// Default minimum covered percent for a reference to be selected
pub const DEFAULT_MIN_PERCENT: f64 = 70.0;

/// Pass/fail thresholds applied to every candidate reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_median: i64,
    pub min_percent: f64,
}

impl Thresholds {
    #[must_use]
    pub fn new(min_median: i64, min_percent: f64) -> Self {
        Self {
            min_median,
            min_percent,
        }
    }

    /// Whether a reference is good enough to build a consensus against
    #[must_use]
    pub fn passes(&self, record: &CoverageRecord) -> bool {
        record.median_coverage >= self.min_median && record.covered_percent >= self.min_percent
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MEDIAN, DEFAULT_MIN_PERCENT)
    }
}

impl std::fmt::Display for Thresholds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "median >= {}, covered percent >= {}",
            self.min_median, self.min_percent
        )
    }
}
