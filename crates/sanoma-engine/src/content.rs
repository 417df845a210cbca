//! Content matching over subject and body text
//!
//! Two related policies exist and are kept as separate operations:
//!
//! | policy | searched text | honours `has_body` |
//! |--------|---------------|--------------------|
//! | pattern coverage | `subject + " " + body` | no |
//! | query | `subject`, then `body` | yes: body only searched when captured |

use crate::error::{EngineError, Result};
use regex::{Regex, RegexBuilder};
use sanoma_domain::EmailRecord;

/// Which content policy a one-shot match uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Search the joined subject and body
    PatternCoverage,
    /// Search the subject, then the body if it was captured
    Query,
}

/// A compiled content pattern
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    regex: Regex,
}

impl ContentMatcher {
    /// Compile `pattern`; matching is case-insensitive unless requested
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| EngineError::pattern(pattern, e))?;
        Ok(Self { regex })
    }

    /// Pattern-coverage policy: search `subject + " " + body`
    ///
    /// The body is searched whether or not it was flagged as captured.
    pub fn search_for_pattern_coverage(&self, subject: &str, body: &str) -> bool {
        let combined = format!("{} {}", subject, body);
        self.regex.is_match(&combined)
    }

    /// Query policy: search `subject`, and `body` only when `has_body`
    ///
    /// Body text that was not captured is never searched, even if the
    /// stored string happens to hold the pattern.
    pub fn search_for_query(&self, subject: &str, body: &str, has_body: bool) -> bool {
        self.regex.is_match(subject) || (has_body && self.regex.is_match(body))
    }

    /// Apply the policy selected by `mode`
    pub fn search(&self, record: &EmailRecord, mode: SearchMode) -> bool {
        match mode {
            SearchMode::PatternCoverage => {
                self.search_for_pattern_coverage(&record.subject, &record.body)
            }
            SearchMode::Query => {
                self.search_for_query(&record.subject, &record.body, record.has_body)
            }
        }
    }
}

/// One-shot content test
pub fn matches_content(
    subject: &str,
    body: &str,
    has_body: bool,
    pattern: &str,
    case_sensitive: bool,
    mode: SearchMode,
) -> Result<bool> {
    let matcher = ContentMatcher::new(pattern, case_sensitive)?;
    Ok(match mode {
        SearchMode::PatternCoverage => matcher.search_for_pattern_coverage(subject, body),
        SearchMode::Query => matcher.search_for_query(subject, body, has_body),
    })
}

/// Records matching `pattern` under the query policy, in input order
///
/// An absent or empty pattern is "no filter" and returns every record.
pub fn query<'a, I>(
    records: I,
    pattern: Option<&str>,
    case_sensitive: bool,
) -> Result<Vec<&'a EmailRecord>>
where
    I: IntoIterator<Item = &'a EmailRecord>,
{
    let pattern = match pattern {
        Some(p) if !p.is_empty() => p,
        _ => return Ok(records.into_iter().collect()),
    };

    let matcher = ContentMatcher::new(pattern, case_sensitive)?;
    let matches: Vec<&EmailRecord> = records
        .into_iter()
        .filter(|r| matcher.search(r, SearchMode::Query))
        .collect();

    tracing::debug!("Query '{}' matched {} records", pattern, matches.len());
    Ok(matches)
}

/// Records matching `pattern` under the pattern-coverage policy,
/// case-insensitively, in input order
pub fn pattern_matches<'a, I>(records: I, pattern: &str) -> Result<Vec<&'a EmailRecord>>
where
    I: IntoIterator<Item = &'a EmailRecord>,
{
    let matcher = ContentMatcher::new(pattern, false)?;
    Ok(records
        .into_iter()
        .filter(|r| matcher.search(r, SearchMode::PatternCoverage))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, body: &str, has_body: bool) -> EmailRecord {
        EmailRecord {
            subject: subject.to_string(),
            body: body.to_string(),
            has_body,
            ..Default::default()
        }
    }

    #[test]
    fn test_query_skips_uncaptured_body() {
        let matcher = ContentMatcher::new("unsubscribe", false).unwrap();
        assert!(!matcher.search_for_query("Weekly news", "click to unsubscribe", false));
        assert!(matcher.search_for_query("Weekly news", "click to unsubscribe", true));
        assert!(matcher.search_for_query("UNSUBSCRIBE now", "", false));
    }

    #[test]
    fn test_pattern_coverage_ignores_has_body() {
        let matcher = ContentMatcher::new("unsubscribe", false).unwrap();
        assert!(matcher.search_for_pattern_coverage("Weekly news", "click to unsubscribe"));
    }

    #[test]
    fn test_pattern_coverage_joins_with_space() {
        let matcher = ContentMatcher::new("news click", false).unwrap();
        assert!(matcher.search_for_pattern_coverage("Weekly news", "click here"));
        assert!(!matcher.search_for_query("Weekly news", "click here", true));
    }

    #[test]
    fn test_case_sensitivity() {
        let sensitive = ContentMatcher::new("Invoice", true).unwrap();
        assert!(!sensitive.search_for_query("your invoice", "", false));
        assert!(sensitive.search_for_query("Your Invoice", "", false));
    }

    #[test]
    fn test_matches_content_modes() {
        assert!(matches_content("a", "secret", false, "secret", false, SearchMode::PatternCoverage).unwrap());
        assert!(!matches_content("a", "secret", false, "secret", false, SearchMode::Query).unwrap());
        assert!(matches_content("a", "b", true, "(", false, SearchMode::Query).is_err());
    }

    #[test]
    fn test_query_empty_pattern_returns_everything() {
        let records = vec![record("a", "", false), record("b", "", false)];
        assert_eq!(query(&records, None, false).unwrap().len(), 2);
        assert_eq!(query(&records, Some(""), false).unwrap().len(), 2);
    }

    #[test]
    fn test_query_invalid_pattern_propagates() {
        let records = vec![record("a", "", false)];
        assert!(matches!(
            query(&records, Some("a(b"), false),
            Err(EngineError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_query_preserves_order() {
        let records = vec![
            record("sale 1", "", false),
            record("other", "", false),
            record("other", "big sale", true),
        ];
        let hits = query(&records, Some("sale"), false).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].subject, "sale 1");
        assert_eq!(hits[1].body, "big sale");
    }

    #[test]
    fn test_pattern_matches_is_case_insensitive() {
        let records = vec![record("", "UNSUBSCRIBE", false), record("hello", "", false)];
        let hits = pattern_matches(&records, "unsubscribe").unwrap();
        assert_eq!(hits.len(), 1);
    }
}
