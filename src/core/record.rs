use serde::{Deserialize, Serialize};

use crate::parsing::covstats::ParseError;

/// Column positions in a BBMap `covstats` table
pub mod columns {
    pub const ID: usize = 0;
    pub const AVERAGE_COVERAGE: usize = 1;
    pub const COVERED_PERCENT: usize = 4;
    pub const PLUS_READS: usize = 6;
    pub const MINUS_READS: usize = 7;
    pub const MEDIAN_COVERAGE: usize = 9;

    /// Minimum number of columns a data row must carry
    pub const MIN_COLUMNS: usize = MEDIAN_COVERAGE + 1;

    /// Columns echoed verbatim for the best-covered reference of a failed sample
    pub const BEST_COVERAGE_STATS: [usize; 6] = [
        ID,
        AVERAGE_COVERAGE,
        COVERED_PERCENT,
        PLUS_READS,
        MINUS_READS,
        MEDIAN_COVERAGE,
    ];
}

/// A single data row of a `covstats` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRecord {
    /// 1-based line number in the source file
    pub line: usize,

    /// Full reference identifier: "accession tag description..."
    pub id: String,

    /// Average fold coverage (`Avg_fold`)
    pub average_coverage: f64,

    /// Percent of reference bases covered by at least one read (`Covered_percent`)
    pub covered_percent: f64,

    /// Reads mapped on the plus strand (`Plus_reads`)
    pub plus_reads: u64,

    /// Reads mapped on the minus strand (`Minus_reads`)
    pub minus_reads: u64,

    /// Median fold coverage (`Median_fold`)
    pub median_coverage: i64,

    /// Raw text of every column, in file order
    #[serde(skip)]
    pub fields: Vec<String>,
}

impl CoverageRecord {
    /// Total reads mapped to this reference on either strand
    #[must_use]
    pub fn mapped_reads(&self) -> u64 {
        self.plus_reads + self.minus_reads
    }

    /// Raw text of a column, exactly as it appeared in the table
    #[must_use]
    pub fn raw(&self, column: usize) -> &str {
        self.fields.get(column).map_or("", String::as_str)
    }

    /// Split the identifier into accession, tag and description.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingTag` if the identifier has no second token.
    pub fn reference_name(&self) -> Result<ReferenceName, ParseError> {
        ReferenceName::parse(&self.id).ok_or_else(|| ParseError::MissingTag {
            line: self.line,
            id: self.id.clone(),
        })
    }

    /// Grouping tag used for the read distribution: the second whitespace-delimited
    /// token of the identifier.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingTag` if the identifier has fewer than two tokens.
    pub fn group_tag(&self) -> Result<&str, ParseError> {
        self.id
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| ParseError::MissingTag {
                line: self.line,
                id: self.id.clone(),
            })
    }
}

/// Decomposed reference identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceName {
    pub accession: String,
    pub tag: String,
    pub description: String,
}

impl ReferenceName {
    /// Split an identifier on single spaces. The description is everything after
    /// the second space, so runs of spaces inside it survive unchanged.
    ///
    /// Returns `None` if there is no tag token.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        let mut parts = id.splitn(3, ' ');
        let accession = parts.next()?;
        let tag = parts.next()?;
        let description = parts.next().unwrap_or("");

        Some(Self {
            accession: accession.to_string(),
            tag: tag.to_string(),
            description: description.to_string(),
        })
    }
}

impl std::fmt::Display for ReferenceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.accession, self.tag, self.description)
    }
}
