//! Turning raw JSON rows into records

use crate::error::Result;
use crate::schema::{check_fields, Field};
use sanoma_domain::EmailRecord;
use serde_json::Value;

/// Check the required-field contract, then deserialize every row
///
/// Fields not listed in `required` fall back to their defaults when absent.
pub fn load_records(rows: Vec<Value>, required: &[Field]) -> Result<Vec<EmailRecord>> {
    check_fields(&rows, required)?;

    let records = rows
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<EmailRecord>, _>>()?;

    tracing::debug!("Loaded {} records", records.len());
    Ok(records)
}
