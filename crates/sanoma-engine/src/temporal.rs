//! Calendar bucketing of records
//!
//! A [`Timeline`] parses every record's date once and drops the records
//! whose date does not parse. All bucketing views are computed from that
//! same dated set, so their totals always agree.

use chrono::{Datelike, NaiveDateTime, Timelike};
use sanoma_domain::EmailRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// English weekday names, Monday first
pub const WEEKDAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Per-bucket counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    /// Records in the bucket
    pub total: usize,
    /// Records in the bucket whose stored `has_body` flag is set
    pub with_body: usize,
}

impl BucketCounts {
    fn record(&mut self, has_body: bool) {
        self.total += 1;
        if has_body {
            self.with_body += 1;
        }
    }

    /// Share of records with a body, as a percentage; `0.0` when empty
    pub fn body_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.with_body as f64 / self.total as f64 * 100.0
        }
    }
}

/// Bucket granularity for presentation rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Calendar year
    Year,
    /// `YYYY-MM`
    Month,
    /// Weekday name
    Weekday,
    /// Hour of day, 0-23
    Hour,
}

/// One presentation row of a bucketed view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    /// Bucket key rendered as text
    pub period: String,
    /// Records in the bucket
    pub total_emails: usize,
    /// Records with a captured body
    pub emails_with_body: usize,
    /// `emails_with_body / total_emails * 100`
    pub body_percentage: f64,
}

impl PeriodRow {
    fn new(period: String, counts: BucketCounts) -> Self {
        Self {
            period,
            total_emails: counts.total,
            emails_with_body: counts.with_body,
            body_percentage: counts.body_percentage(),
        }
    }
}

/// Inclusive span of the dated records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// Earliest timestamp, `None` for an empty timeline
    pub start: Option<NaiveDateTime>,
    /// Latest timestamp, `None` for an empty timeline
    pub end: Option<NaiveDateTime>,
}

/// Headline numbers of a timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    /// Dated records
    pub total_emails: usize,
    /// Dated records with a captured body
    pub emails_with_body: usize,
    /// Span of the dated records
    pub date_range: DateRange,
}

/// Overview of a timeline: headline numbers plus year and weekday views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalSummary {
    /// Headline numbers
    pub dataset_info: DatasetInfo,
    /// Counts per calendar year
    pub by_year: BTreeMap<i32, BucketCounts>,
    /// Counts per weekday name
    pub by_weekday: HashMap<String, BucketCounts>,
}

/// The dated subset of a record collection
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    entries: Vec<(NaiveDateTime, &'a EmailRecord)>,
    skipped: usize,
}

impl<'a> Timeline<'a> {
    /// Parse every record's date, keeping only the ones that parse
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EmailRecord>,
    {
        let mut entries = Vec::new();
        let mut skipped = 0;

        for record in records {
            match record.date_parsed() {
                Some(ts) => entries.push((ts, record)),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Excluded {} records with unparseable dates", skipped);
        }

        Self { entries, skipped }
    }

    /// Number of dated records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no record carried a parseable date
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records excluded for an unparseable date
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Dated records whose stored `has_body` flag is set
    pub fn with_body(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.has_body).count()
    }

    fn bucket<K, F>(&self, key: F) -> BTreeMap<K, BucketCounts>
    where
        K: Ord,
        F: Fn(&NaiveDateTime) -> K,
    {
        let mut buckets: BTreeMap<K, BucketCounts> = BTreeMap::new();
        for (ts, record) in &self.entries {
            buckets.entry(key(ts)).or_default().record(record.has_body);
        }
        buckets
    }

    /// Counts per calendar year
    pub fn by_year(&self) -> BTreeMap<i32, BucketCounts> {
        self.bucket(|ts| ts.year())
    }

    /// Counts per `YYYY-MM`, optionally restricted to one year
    pub fn by_month(&self, year: Option<i32>) -> BTreeMap<String, BucketCounts> {
        let mut buckets: BTreeMap<String, BucketCounts> = BTreeMap::new();
        for (ts, record) in &self.entries {
            if year.is_some_and(|y| ts.year() != y) {
                continue;
            }
            buckets
                .entry(format!("{:04}-{:02}", ts.year(), ts.month()))
                .or_default()
                .record(record.has_body);
        }
        buckets
    }

    /// Counts per English weekday name
    ///
    /// The map is unordered; use [`WEEKDAY_ORDER`] to present it.
    pub fn by_weekday(&self) -> HashMap<String, BucketCounts> {
        let mut buckets: HashMap<String, BucketCounts> = HashMap::new();
        for (ts, record) in &self.entries {
            let name = WEEKDAY_ORDER[ts.weekday().num_days_from_monday() as usize];
            buckets
                .entry(name.to_string())
                .or_default()
                .record(record.has_body);
        }
        buckets
    }

    /// Counts per hour of day
    pub fn by_hour(&self) -> BTreeMap<u32, BucketCounts> {
        self.bucket(|ts| ts.hour())
    }

    /// Earliest and latest timestamps, `None` when empty
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.entries.iter().map(|(ts, _)| *ts).min()?;
        let max = self.entries.iter().map(|(ts, _)| *ts).max()?;
        Some((min, max))
    }

    /// Headline numbers plus the year and weekday views
    pub fn summary(&self) -> TemporalSummary {
        let date_range = match self.date_range() {
            Some((start, end)) => DateRange {
                start: Some(start),
                end: Some(end),
            },
            None => DateRange::default(),
        };

        TemporalSummary {
            dataset_info: DatasetInfo {
                total_emails: self.len(),
                emails_with_body: self.with_body(),
                date_range,
            },
            by_year: self.by_year(),
            by_weekday: self.by_weekday(),
        }
    }

    /// Presentation rows for one granularity, in natural key order
    ///
    /// Weekday rows run Monday to Sunday and skip absent days. `year`
    /// only affects [`Granularity::Month`].
    pub fn rows(&self, granularity: Granularity, year: Option<i32>) -> Vec<PeriodRow> {
        match granularity {
            Granularity::Year => self
                .by_year()
                .into_iter()
                .map(|(y, counts)| PeriodRow::new(y.to_string(), counts))
                .collect(),
            Granularity::Month => self
                .by_month(year)
                .into_iter()
                .map(|(m, counts)| PeriodRow::new(m, counts))
                .collect(),
            Granularity::Weekday => {
                let days = self.by_weekday();
                WEEKDAY_ORDER
                    .iter()
                    .filter_map(|day| days.get(*day).map(|c| PeriodRow::new(day.to_string(), *c)))
                    .collect()
            }
            Granularity::Hour => self
                .by_hour()
                .into_iter()
                .map(|(h, counts)| PeriodRow::new(h.to_string(), counts))
                .collect(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dated_records() -> impl Strategy<Value = Vec<EmailRecord>> {
        let date = prop_oneof![
            "20[0-2][0-9]-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8]) ([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]",
            "[a-z ]{0,12}",
        ];
        prop::collection::vec((date, any::<bool>()), 0..80).prop_map(|rows| {
            rows.into_iter()
                .map(|(date, has_body)| EmailRecord {
                    date,
                    has_body,
                    ..Default::default()
                })
                .collect()
        })
    }

    proptest! {
        /// Property: every parseable record lands in exactly one bucket per view
        #[test]
        fn test_bucketing_completeness(records in dated_records()) {
            let parseable = records.iter().filter(|r| r.date_parsed().is_some()).count();
            let timeline = Timeline::new(&records);

            let year_total: usize = timeline.by_year().values().map(|c| c.total).sum();
            let month_total: usize = timeline.by_month(None).values().map(|c| c.total).sum();
            let weekday_total: usize = timeline.by_weekday().values().map(|c| c.total).sum();
            let hour_total: usize = timeline.by_hour().values().map(|c| c.total).sum();

            prop_assert_eq!(year_total, parseable);
            prop_assert_eq!(month_total, parseable);
            prop_assert_eq!(weekday_total, parseable);
            prop_assert_eq!(hour_total, parseable);
            prop_assert_eq!(timeline.skipped(), records.len() - parseable);
        }

        /// Property: with_body never exceeds total in any bucket
        #[test]
        fn test_with_body_bounded(records in dated_records()) {
            for counts in Timeline::new(&records).by_hour().values() {
                prop_assert!(counts.with_body <= counts.total);
            }
        }
    }
}
