//! Error types for engine operations

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while running an analysis
#[derive(Error, Debug)]
pub enum EngineError {
    /// The input collection lacks fields the operation needs
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A supplied regular expression does not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// Underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// A present field carries a value of the wrong type
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    /// Coverage threshold is not a number
    #[error("Invalid coverage threshold: {0}")]
    InvalidThreshold(f64),
}

impl EngineError {
    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        EngineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}
