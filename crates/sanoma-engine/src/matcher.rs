//! Sender domain matching
//!
//! A domain pattern is either a leading-wildcard suffix (`*.edu`) or a
//! case-insensitive regular expression searched anywhere in the domain.
//! Only the leading `*.` is special; this is not a glob engine.

use crate::error::{EngineError, Result};
use regex::{Regex, RegexBuilder};
use sanoma_domain::EmailRecord;

/// What to do when a non-wildcard pattern is not a valid regex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPatternPolicy {
    /// Degrade to a case-insensitive exact comparison
    FallbackToExact,
    /// Return [`EngineError::InvalidPattern`]
    Propagate,
}

/// A compiled domain pattern
#[derive(Debug, Clone)]
pub enum DomainPattern {
    /// `*.suffix`: lowercased domain must end with `suffix`
    Suffix(String),
    /// Case-insensitive regex, unanchored
    Regex(Regex),
    /// Case-insensitive equality (invalid-regex fallback)
    Exact(String),
}

impl DomainPattern {
    /// Compile a pattern under the given invalid-pattern policy
    ///
    /// # Examples
    ///
    /// ```
    /// use sanoma_engine::{DomainPattern, InvalidPatternPolicy};
    ///
    /// let edu = DomainPattern::compile("*.edu", InvalidPatternPolicy::Propagate).unwrap();
    /// assert!(edu.matches("mail.wsu.edu"));
    /// assert!(!edu.matches("wsu.edu.com"));
    ///
    /// let broken = DomainPattern::compile("(wsu", InvalidPatternPolicy::FallbackToExact).unwrap();
    /// assert!(broken.matches("(WSU"));
    /// assert!(DomainPattern::compile("(wsu", InvalidPatternPolicy::Propagate).is_err());
    /// ```
    pub fn compile(pattern: &str, policy: InvalidPatternPolicy) -> Result<Self> {
        if let Some(suffix) = pattern.strip_prefix("*.") {
            return Ok(DomainPattern::Suffix(suffix.to_lowercase()));
        }

        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => Ok(DomainPattern::Regex(regex)),
            Err(e) => match policy {
                InvalidPatternPolicy::FallbackToExact => {
                    tracing::warn!(
                        "Domain pattern '{}' is not a valid regex, matching exactly: {}",
                        pattern,
                        e
                    );
                    Ok(DomainPattern::Exact(pattern.to_lowercase()))
                }
                InvalidPatternPolicy::Propagate => Err(EngineError::pattern(pattern, e)),
            },
        }
    }

    /// Whether `domain` belongs to this pattern; an empty domain never does
    pub fn matches(&self, domain: &str) -> bool {
        if domain.is_empty() {
            return false;
        }
        match self {
            DomainPattern::Suffix(suffix) => domain.to_lowercase().ends_with(suffix.as_str()),
            DomainPattern::Regex(regex) => regex.is_match(domain),
            DomainPattern::Exact(exact) => domain.to_lowercase() == *exact,
        }
    }

    /// Keep the records whose sender domain matches, in input order
    pub fn filter<'a, I>(&self, records: I) -> Vec<&'a EmailRecord>
    where
        I: IntoIterator<Item = &'a EmailRecord>,
    {
        records
            .into_iter()
            .filter(|r| self.matches(&r.from_domain))
            .collect()
    }
}

/// One-shot domain test; invalid regexes are reported as errors
pub fn matches_domain(domain: &str, pattern: &str) -> Result<bool> {
    Ok(DomainPattern::compile(pattern, InvalidPatternPolicy::Propagate)?.matches(domain))
}

/// Keep the records whose `from_domain` matches `pattern`
pub fn filter_by_domain<'a, I>(
    records: I,
    pattern: &str,
    policy: InvalidPatternPolicy,
) -> Result<Vec<&'a EmailRecord>>
where
    I: IntoIterator<Item = &'a EmailRecord>,
{
    let compiled = DomainPattern::compile(pattern, policy)?;
    Ok(compiled.filter(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str) -> EmailRecord {
        EmailRecord {
            from_domain: domain.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_suffix_wildcard() {
        assert!(matches_domain("mail.wsu.edu", "*.edu").unwrap());
        assert!(matches_domain("MAIL.WSU.EDU", "*.Edu").unwrap());
        assert!(!matches_domain("wsu.edu.com", "*.edu").unwrap());
    }

    #[test]
    fn test_regex_is_substring_search() {
        assert!(matches_domain("mail.wsu.edu", "wsu").unwrap());
        assert!(matches_domain("mail.wsu.edu", "W.U").unwrap());
        assert!(!matches_domain("mail.wsu.edu", "^wsu").unwrap());
    }

    #[test]
    fn test_empty_domain_never_matches() {
        assert!(!matches_domain("", ".*").unwrap());
        assert!(!matches_domain("", "*.").unwrap());
    }

    #[test]
    fn test_invalid_regex_policies() {
        assert!(matches!(
            matches_domain("a.com", "[a"),
            Err(EngineError::InvalidPattern { .. })
        ));

        let fallback = DomainPattern::compile("[A.com", InvalidPatternPolicy::FallbackToExact).unwrap();
        assert!(matches!(fallback, DomainPattern::Exact(_)));
        assert!(fallback.matches("[a.com"));
        assert!(!fallback.matches("a.com"));
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = vec![record("b.edu"), record("x.com"), record("a.edu"), record("")];
        let kept = filter_by_domain(&records, "*.edu", InvalidPatternPolicy::Propagate).unwrap();
        let domains: Vec<&str> = kept.iter().map(|r| r.from_domain.as_str()).collect();
        assert_eq!(domains, vec!["b.edu", "a.edu"]);
    }
}
