//! Required-field contract between callers and the engine
//!
//! Each operation names the record fields it reads. Raw rows are checked
//! eagerly, before any processing, and every missing field is reported in a
//! single [`EngineError::MissingFields`].

use crate::error::{EngineError, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// A column of the record model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// `message_id`
    MessageId,
    /// `date`
    Date,
    /// `from`
    From,
    /// `from_domain`
    FromDomain,
    /// `to`
    To,
    /// `subject`
    Subject,
    /// `folder`
    Folder,
    /// `body`
    Body,
    /// `has_body`
    HasBody,
}

impl Field {
    /// Column name as it appears in a dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::MessageId => "message_id",
            Field::Date => "date",
            Field::From => "from",
            Field::FromDomain => "from_domain",
            Field::To => "to",
            Field::Subject => "subject",
            Field::Folder => "folder",
            Field::Body => "body",
            Field::HasBody => "has_body",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyses that consume a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Filter pipeline
    Filter,
    /// Pattern query
    Query,
    /// Descriptive statistics
    Stats,
    /// Domain coverage and comparison
    Domains,
    /// Temporal bucketing
    Timeline,
}

impl Operation {
    /// Fields the operation reads
    pub fn required_fields(&self) -> &'static [Field] {
        match self {
            Operation::Filter => &[Field::FromDomain, Field::Date, Field::Subject, Field::HasBody],
            Operation::Query => &[Field::Subject, Field::Body, Field::HasBody],
            Operation::Stats => &[Field::FromDomain, Field::Date, Field::HasBody],
            Operation::Domains => &[Field::FromDomain, Field::Subject, Field::Body],
            Operation::Timeline => &[Field::Date, Field::HasBody],
        }
    }
}

/// Verify that every row carries every required field
///
/// A field counts as missing when at least one row lacks the key (a row
/// that is not a JSON object lacks all of them). An empty collection
/// passes. Missing names are reported sorted and all at once.
pub fn check_fields(rows: &[Value], required: &[Field]) -> Result<()> {
    let mut missing = BTreeSet::new();

    for row in rows {
        for field in required {
            let present = row
                .as_object()
                .is_some_and(|obj| obj.contains_key(field.as_str()));
            if !present {
                missing.insert(field.as_str());
            }
        }
        if missing.len() == required.len() {
            break;
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::MissingFields(
            missing.into_iter().map(str::to_string).collect(),
        ))
    }
}
