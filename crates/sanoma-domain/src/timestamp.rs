//! Timestamp module - parsing the canonical `date` prefix

use chrono::NaiveDateTime;

/// Layout of the canonical timestamp prefix of the `date` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of characters that make up the canonical timestamp
const TIMESTAMP_LEN: usize = 19;

/// Parse the first 19 characters of a raw `date` value
///
/// Anything after the canonical prefix (fractional seconds, zone names) is
/// ignored. Empty or malformed input yields `None`.
///
/// # Examples
///
/// ```
/// use sanoma_domain::parse_timestamp;
///
/// let ts = parse_timestamp("2020-01-01 10:00:00.123 +0000").unwrap();
/// assert_eq!(ts.to_string(), "2020-01-01 10:00:00");
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let prefix = match raw.char_indices().nth(TIMESTAMP_LEN) {
        Some((end, _)) => &raw[..end],
        None => raw,
    };
    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT).ok()
}
