//! Cumulative-coverage ranking of sender domains
//!
//! Domains are ranked by how many records they sent. The ranking walks the
//! sorted counts, accumulating a running total, and stops right after the
//! domain whose inclusion brings cumulative coverage to the threshold.
//!
//! Equal counts are ordered by domain name, ascending, so a ranking is
//! fully determined by its input multiset.

use crate::content::pattern_matches;
use crate::error::{EngineError, Result};
use crate::matcher::{DomainPattern, InvalidPatternPolicy};
use sanoma_domain::EmailRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One row of a coverage ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainRank {
    /// Sender domain
    pub domain: String,
    /// Records from this domain
    pub count: usize,
    /// Share of all records, as a percentage (0-100)
    pub percentage: f64,
    /// Running share including this domain, as a fraction (0-1)
    pub cumulative_percentage: f64,
}

/// Result of [`rank_domains`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Emitted domains, non-increasing in count
    pub ranked: Vec<DomainRank>,
    /// Cumulative fraction reached by the emitted domains
    pub achieved_coverage: f64,
}

/// Count domains sorted by count descending, then name ascending
pub(crate) fn ranked_counts<'a, I>(domains: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for domain in domains {
        *counts.entry(domain).or_insert(0) += 1;
    }

    rank_histogram(counts)
}

/// Order a histogram by count descending, then key ascending
pub(crate) fn rank_histogram<K: Ord>(histogram: BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut sorted: Vec<(K, usize)> = histogram.into_iter().collect();
    // Stable sort keeps the BTreeMap's key order among equal counts
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Rank sender domains until `threshold` cumulative coverage is reached
///
/// `threshold` is a fraction. The domain that crosses the line is
/// included. If every domain is emitted without reaching the threshold,
/// the achieved coverage is the full-set value. An empty input yields an
/// empty ranking and `0.0`; a threshold of zero or below emits exactly one
/// domain.
///
/// # Examples
///
/// ```
/// use sanoma_domain::EmailRecord;
/// use sanoma_engine::rank_domains;
///
/// let records: Vec<EmailRecord> = ["a.edu", "a.edu", "b.com"]
///     .iter()
///     .map(|d| EmailRecord { from_domain: d.to_string(), ..Default::default() })
///     .collect();
///
/// let report = rank_domains(&records, 0.6);
/// assert_eq!(report.ranked.len(), 1);
/// assert_eq!(report.ranked[0].domain, "a.edu");
/// assert!((report.achieved_coverage - 2.0 / 3.0).abs() < 1e-9);
/// ```
pub fn rank_domains<'a, I>(records: I, threshold: f64) -> CoverageReport
where
    I: IntoIterator<Item = &'a EmailRecord>,
{
    let sorted = ranked_counts(records.into_iter().map(|r| r.from_domain.as_str()));
    let total: usize = sorted.iter().map(|(_, count)| count).sum();

    if total == 0 {
        return CoverageReport {
            ranked: Vec::new(),
            achieved_coverage: 0.0,
        };
    }

    let total_f = total as f64;
    let mut cumulative = 0usize;
    let mut ranked = Vec::new();

    for (domain, count) in sorted {
        cumulative += count;
        let cumulative_percentage = cumulative as f64 / total_f;

        ranked.push(DomainRank {
            domain: domain.to_string(),
            count,
            percentage: count as f64 / total_f * 100.0,
            cumulative_percentage,
        });

        if cumulative_percentage >= threshold {
            break;
        }
    }

    tracing::debug!(
        "Ranked {} domains over {} records (threshold {})",
        ranked.len(),
        total,
        threshold
    );

    CoverageReport {
        ranked,
        achieved_coverage: cumulative as f64 / total_f,
    }
}

/// Coverage of the records matching a content pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternAnalysis {
    /// Content pattern searched in subject and body
    pub pattern: String,
    /// Records matching the pattern
    pub total_emails: usize,
    /// Requested cumulative coverage
    pub coverage_threshold: f64,
    /// Coverage reached by `top_domains`
    pub actual_coverage: f64,
    /// Ranked domains producing the pattern
    pub top_domains: Vec<DomainRank>,
}

/// Records whose sender matches a comparison domain pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainComparison {
    /// Domain pattern compared against
    pub pattern: String,
    /// Records from matching domains
    pub total_emails: usize,
    /// Distinct matching domains, sorted
    pub domains: Vec<String>,
}

/// Full result of a domain analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainAnalysis {
    /// Which domains produce the content pattern
    pub pattern_analysis: PatternAnalysis,
    /// Which domains match the comparison pattern
    pub comparison: DomainComparison,
    /// Domains present in both, sorted
    pub overlap: Vec<String>,
}

/// Rank the domains producing `content_pattern` and compare them with the
/// domains matching `compare_pattern`
///
/// Both patterns must be valid regexes: the comparison uses
/// [`InvalidPatternPolicy::Propagate`].
pub fn analyze_domains(
    records: &[EmailRecord],
    content_pattern: &str,
    compare_pattern: &str,
    threshold: f64,
) -> Result<DomainAnalysis> {
    if threshold.is_nan() {
        return Err(EngineError::InvalidThreshold(threshold));
    }

    let pattern_records = pattern_matches(records, content_pattern)?;
    let report = rank_domains(pattern_records.iter().copied(), threshold);

    let compare = DomainPattern::compile(compare_pattern, InvalidPatternPolicy::Propagate)?;
    let compare_records = compare.filter(records);
    let compare_domains: BTreeSet<&str> = compare_records
        .iter()
        .map(|r| r.from_domain.as_str())
        .collect();

    let overlap = report
        .ranked
        .iter()
        .map(|rank| rank.domain.as_str())
        .filter(|domain| compare_domains.contains(domain))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(DomainAnalysis {
        pattern_analysis: PatternAnalysis {
            pattern: content_pattern.to_string(),
            total_emails: pattern_records.len(),
            coverage_threshold: threshold,
            actual_coverage: report.achieved_coverage,
            top_domains: report.ranked,
        },
        comparison: DomainComparison {
            pattern: compare_pattern.to_string(),
            total_emails: compare_records.len(),
            domains: compare_domains.into_iter().map(str::to_string).collect(),
        },
        overlap,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn domain_records() -> impl Strategy<Value = Vec<EmailRecord>> {
        prop::collection::vec("[a-e]\\.(com|edu)", 1..60).prop_map(|domains| {
            domains
                .into_iter()
                .map(|d| EmailRecord {
                    from_domain: d,
                    ..Default::default()
                })
                .collect()
        })
    }

    proptest! {
        /// Property: coverage reaches the threshold unless every domain was emitted
        #[test]
        fn test_coverage_monotonicity(recs in domain_records(), threshold in 0.01f64..=1.0) {
            let report = rank_domains(&recs, threshold);
            let distinct: BTreeSet<&str> = recs.iter().map(|r| r.from_domain.as_str()).collect();

            if report.achieved_coverage < threshold {
                prop_assert_eq!(report.ranked.len(), distinct.len());
            }
            prop_assert!(report.achieved_coverage <= 1.0 + 1e-9);
        }

        /// Property: emitted counts never increase
        #[test]
        fn test_ranking_order(recs in domain_records(), threshold in 0.0f64..=1.0) {
            let report = rank_domains(&recs, threshold);
            for pair in report.ranked.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }

        /// Property: cumulative fractions grow and the last equals achieved coverage
        #[test]
        fn test_cumulative_consistency(recs in domain_records(), threshold in 0.0f64..=1.0) {
            let report = rank_domains(&recs, threshold);
            for pair in report.ranked.windows(2) {
                prop_assert!(pair[0].cumulative_percentage < pair[1].cumulative_percentage);
            }
            let last = report.ranked.last().map(|r| r.cumulative_percentage).unwrap_or(0.0);
            prop_assert!((last - report.achieved_coverage).abs() < 1e-12);
        }
    }
}
