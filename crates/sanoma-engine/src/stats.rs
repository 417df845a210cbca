//! Descriptive statistics for a whole collection
//!
//! Years here are the four-character prefix of the raw `date` string, not
//! the calendar bucketing of [`crate::temporal`]. The two can disagree: a
//! malformed date still contributes its prefix here, while the timeline
//! drops it.

use crate::coverage::rank_histogram;
use sanoma_domain::EmailRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Frequency counts over a whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// Number of records
    pub total: usize,
    /// Records whose stored `has_body` flag is set
    pub with_body: usize,
    /// Records per sender domain
    pub domain_histogram: BTreeMap<String, usize>,
    /// Records per date prefix (`"unknown"` for short dates)
    pub year_histogram: BTreeMap<String, usize>,
    /// Records per folder (`"unknown"` when absent)
    pub folder_histogram: BTreeMap<String, usize>,
    /// Domains by count descending, then name ascending
    pub domain_rank_list: Vec<(String, usize)>,
}

impl DatasetStats {
    /// Number of distinct sender domains
    pub fn unique_domains(&self) -> usize {
        self.domain_histogram.len()
    }

    /// Smallest and largest year keys, compared as strings
    pub fn year_span(&self) -> Option<(&str, &str)> {
        let first = self.year_histogram.keys().next()?;
        let last = self.year_histogram.keys().next_back()?;
        Some((first.as_str(), last.as_str()))
    }

    /// The `n` most frequent domains
    pub fn top_domains(&self, n: usize) -> &[(String, usize)] {
        &self.domain_rank_list[..n.min(self.domain_rank_list.len())]
    }
}

/// Summarize a record collection
pub fn summarize<'a, I>(records: I) -> DatasetStats
where
    I: IntoIterator<Item = &'a EmailRecord>,
{
    let mut stats = DatasetStats::default();

    for record in records {
        stats.total += 1;
        if record.has_body {
            stats.with_body += 1;
        }

        *stats
            .domain_histogram
            .entry(record.from_domain.clone())
            .or_insert(0) += 1;
        *stats
            .year_histogram
            .entry(record.year_prefix().to_string())
            .or_insert(0) += 1;
        *stats
            .folder_histogram
            .entry(record.folder_or_unknown().to_string())
            .or_insert(0) += 1;
    }

    stats.domain_rank_list = rank_histogram(stats.domain_histogram.clone());
    stats
}
