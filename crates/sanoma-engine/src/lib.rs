//! Sanoma Engine
//!
//! Query and analytics over an in-memory collection of [`EmailRecord`]s.
//!
//! # Overview
//!
//! Every operation is a pure function: it borrows the input collection,
//! never mutates it, and returns either a borrowed subsequence (in input
//! order) or an owned aggregate. Nothing here performs I/O, reads ambient
//! configuration, prints, or exits; all parameters are passed explicitly.
//!
//! # Architecture
//!
//! ```text
//! JSON rows → dataset::load_records → &[EmailRecord]
//!                                        ├─ filter   (ordered pipeline)
//!                                        ├─ content  (query / pattern coverage)
//!                                        ├─ coverage (domain ranking, comparison)
//!                                        ├─ temporal (year / month / weekday / hour)
//!                                        └─ stats    (histograms)
//! ```
//!
//! # Error Handling
//!
//! | condition | outcome |
//! |-----------|---------|
//! | required field absent | [`EngineError::MissingFields`] listing all of them |
//! | invalid regex | [`EngineError::InvalidPattern`], except the filter pipeline's domain step, which falls back to exact matching |
//! | unparseable date | record silently left out of temporal views |
//! | empty input | empty / zero results |
//!
//! # Example Usage
//!
//! ```
//! use sanoma_domain::EmailRecord;
//! use sanoma_engine::{apply_filters, rank_domains, Filter, Timeline};
//!
//! let records = vec![
//!     EmailRecord::from_raw("1", "2020-01-01 10:00:00", "a@a.edu", "", "Hi", "body", None),
//!     EmailRecord::from_raw("2", "2020-02-01 10:00:00", "b@a.edu", "", "Re: Hi", "", None),
//!     EmailRecord::from_raw("3", "2021-01-01 10:00:00", "c@b.com", "", "Sale", "body", None),
//! ];
//!
//! let edu = apply_filters(&records, &[Filter::Domain("*.edu".to_string())]);
//! assert_eq!(edu.len(), 2);
//!
//! let years = Timeline::new(&records).by_year();
//! assert_eq!(years[&2020].total, 2);
//! assert_eq!(years[&2020].with_body, 1);
//!
//! let coverage = rank_domains(&records, 0.6);
//! assert_eq!(coverage.ranked[0].domain, "a.edu");
//! ```

#![warn(missing_docs)]

pub mod content;
pub mod coverage;
pub mod dataset;
mod error;
pub mod filter;
pub mod matcher;
pub mod schema;
pub mod stats;
pub mod temporal;

pub use content::{matches_content, pattern_matches, query, ContentMatcher, SearchMode};
pub use coverage::{
    analyze_domains, rank_domains, CoverageReport, DomainAnalysis, DomainComparison, DomainRank,
    PatternAnalysis,
};
pub use dataset::load_records;
pub use error::{EngineError, Result};
pub use filter::{apply_filters, Filter, FilterPipeline};
pub use matcher::{filter_by_domain, matches_domain, DomainPattern, InvalidPatternPolicy};
pub use schema::{check_fields, Field, Operation};
pub use stats::{summarize, DatasetStats};
pub use temporal::{
    BucketCounts, DateRange, DatasetInfo, Granularity, PeriodRow, TemporalSummary, Timeline,
    WEEKDAY_ORDER,
};

pub use sanoma_domain::EmailRecord;
