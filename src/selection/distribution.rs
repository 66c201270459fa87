use std::collections::HashMap;

use crate::core::record::CoverageRecord;
use crate::core::report::ReadDistribution;
use crate::parsing::covstats::ParseError;

/// Sum mapped reads per reference tag.
///
/// Tags are kept in the order they are first seen in `records`, then stably
/// sorted by total reads, most first, so equal totals keep first-seen order.
///
/// # Errors
///
/// Returns `ParseError::MissingTag` if a record id has no tag.
pub fn read_distribution(records: &[&CoverageRecord]) -> Result<ReadDistribution, ParseError> {
    let mut entries: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let tag = record.group_tag()?;
        let reads = record.mapped_reads();

        if let Some(&i) = index.get(tag) {
            entries[i].1 += reads;
        } else {
            index.insert(tag.to_string(), entries.len());
            entries.push((tag.to_string(), reads));
        }
    }

    entries.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ReadDistribution { entries })
}
