//! Reading datasets and writing results.

use crate::error::{CliError, Result};
use sanoma_domain::EmailRecord;
use sanoma_engine::{load_records, Operation};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a JSON array of records, checking the fields `operation` needs.
pub fn read_dataset(path: &Path, operation: Operation) -> Result<Vec<EmailRecord>> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = match serde_json::from_str::<Value>(&contents)? {
        Value::Array(rows) => rows,
        other => {
            return Err(CliError::InvalidInput(format!(
                "{} must contain a JSON array of records, found {}",
                path.display(),
                json_kind(&other)
            )))
        }
    };

    tracing::info!("Loaded {} row(s) from {}", rows.len(), path.display());
    Ok(load_records(rows, operation.required_fields())?)
}

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
