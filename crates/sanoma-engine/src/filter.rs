//! Ordered filter pipeline
//!
//! Filters run in the order given, each on the previous one's output. The
//! order matters for [`Filter::Limit`]: a limit followed by a predicate
//! filters the truncated set, a predicate followed by a limit truncates the
//! filtered set. The pipeline never reorders filters.

use crate::matcher::{DomainPattern, InvalidPatternPolicy};
use sanoma_domain::EmailRecord;
use serde_json::Value;

/// A single filter step
///
/// Falsy values (empty strings, `false`, a zero limit) make the step a
/// no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Keep records whose `from_domain` matches the domain pattern;
    /// invalid regexes fall back to exact matching
    Domain(String),
    /// Keep records whose raw `date` contains the text
    Year(String),
    /// Keep records whose subject contains the text, case-insensitively
    SubjectContains(String),
    /// Keep records with a captured body
    HasBody(bool),
    /// Keep the first N records of the current result
    Limit(usize),
}

impl Filter {
    /// Whether the filter does anything
    pub fn is_active(&self) -> bool {
        match self {
            Filter::Domain(s) | Filter::Year(s) | Filter::SubjectContains(s) => !s.is_empty(),
            Filter::HasBody(b) => *b,
            Filter::Limit(n) => *n > 0,
        }
    }

    /// Build a filter from a named entry with JSON truthiness
    ///
    /// Returns `None` for unrecognised names and for falsy values (`null`,
    /// `""`, `0`, `false`, empty containers). Limits accept non-negative
    /// integers or numeric strings.
    pub fn from_entry(name: &str, value: &Value) -> Option<Self> {
        if !is_truthy(value) {
            return None;
        }

        let text = || match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        match name {
            "domain" => Some(Filter::Domain(text())),
            "year" => Some(Filter::Year(text())),
            "subject_contains" => Some(Filter::SubjectContains(text())),
            "has_body" => Some(Filter::HasBody(true)),
            "limit" => {
                let limit = match value {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => s.trim().parse::<u64>().ok(),
                    _ => None,
                };
                match limit {
                    Some(n) => Some(Filter::Limit(n as usize)),
                    None => {
                        tracing::warn!("Ignoring non-numeric limit: {}", value);
                        None
                    }
                }
            }
            other => {
                tracing::warn!("Ignoring unknown filter '{}'", other);
                None
            }
        }
    }

    fn apply<'a>(&self, records: Vec<&'a EmailRecord>) -> Vec<&'a EmailRecord> {
        if !self.is_active() {
            return records;
        }

        match self {
            Filter::Domain(pattern) => {
                match DomainPattern::compile(pattern, InvalidPatternPolicy::FallbackToExact) {
                    Ok(compiled) => compiled.filter(records),
                    // FallbackToExact never fails to compile
                    Err(_) => records,
                }
            }
            Filter::Year(year) => records
                .into_iter()
                .filter(|r| r.date.contains(year.as_str()))
                .collect(),
            Filter::SubjectContains(text) => {
                let needle = text.to_lowercase();
                records
                    .into_iter()
                    .filter(|r| r.subject.to_lowercase().contains(&needle))
                    .collect()
            }
            Filter::HasBody(_) => records.into_iter().filter(|r| r.has_body).collect(),
            Filter::Limit(n) => records.into_iter().take(*n).collect(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// An ordered list of filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPipeline {
    filters: Vec<Filter>,
}

impl FilterPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from named entries, keeping their order
    ///
    /// # Examples
    ///
    /// ```
    /// use sanoma_engine::{Filter, FilterPipeline};
    /// use serde_json::json;
    ///
    /// let pipeline = FilterPipeline::from_entries([
    ///     ("domain", json!("*.edu")),
    ///     ("year", json!(null)),
    ///     ("limit", json!(5)),
    /// ]);
    /// assert_eq!(
    ///     pipeline.filters(),
    ///     &[Filter::Domain("*.edu".to_string()), Filter::Limit(5)]
    /// );
    /// ```
    pub fn from_entries<'n, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'n str, Value)>,
    {
        let filters = entries
            .into_iter()
            .filter_map(|(name, value)| Filter::from_entry(name, &value))
            .collect();
        Self { filters }
    }

    /// Append a filter step
    pub fn push(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Filter steps in application order
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Run every step over `records`
    pub fn apply<'a>(&self, records: &'a [EmailRecord]) -> Vec<&'a EmailRecord> {
        apply_filters(records, &self.filters)
    }
}

/// Apply `filters` in order, each to the previous step's output
pub fn apply_filters<'a>(records: &'a [EmailRecord], filters: &[Filter]) -> Vec<&'a EmailRecord> {
    let mut current: Vec<&EmailRecord> = records.iter().collect();
    for filter in filters {
        current = filter.apply(current);
    }

    tracing::debug!(
        "Filtered {} records to {} with {} steps",
        records.len(),
        current.len(),
        filters.len()
    );
    current
}
