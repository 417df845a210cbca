//! Record module - the fundamental unit of a mailbox dataset

use crate::address::{canonical_message_id, extract_domain, UNKNOWN_DOMAIN};
use crate::timestamp::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder used by histograms for absent folder or year values
pub const UNKNOWN: &str = "unknown";

/// One email's flattened representation
///
/// Records are produced once by extraction and never mutated afterwards;
/// every analysis borrows them. `has_body` is a stored fact recorded at
/// extraction time and is never recomputed from `body`, since the body text
/// may later be withheld while the flag still records that it existed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Angle-bracket-wrapped message id, empty if absent
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message_id: String,

    /// Raw date string; the first 19 characters are the canonical timestamp
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,

    /// Raw sender header
    #[serde(default, deserialize_with = "null_as_empty")]
    pub from: String,

    /// Lowercased sender domain, or one of the sentinel values
    ///
    /// A null, empty or absent value deserializes to `"unknown"`.
    #[serde(default = "unknown_domain", deserialize_with = "domain_or_unknown")]
    pub from_domain: String,

    /// Raw recipient header
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,

    /// Subject line
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,

    /// Folder the message was filed in, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// Body text (may be empty or withheld)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,

    /// Whether a non-empty body was captured at extraction time; null reads
    /// as `false`
    #[serde(default, deserialize_with = "null_as_false")]
    pub has_body: bool,
}

impl EmailRecord {
    /// Build a record from raw extracted columns, deriving
    /// `message_id`, `from_domain` and `has_body`
    ///
    /// # Examples
    ///
    /// ```
    /// use sanoma_domain::EmailRecord;
    ///
    /// let record = EmailRecord::from_raw(
    ///     "abc@host",
    ///     "2020-01-01 10:00:00",
    ///     "Jane <jane@Example.edu>",
    ///     "me@home.net",
    ///     "Hello",
    ///     "Body text",
    ///     Some("Inbox"),
    /// );
    /// assert_eq!(record.message_id, "<abc@host>");
    /// assert_eq!(record.from_domain, "example.edu");
    /// assert!(record.has_body);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        message_id: &str,
        date: &str,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
        folder: Option<&str>,
    ) -> Self {
        Self {
            message_id: canonical_message_id(message_id),
            date: date.to_string(),
            from: from.to_string(),
            from_domain: extract_domain(from),
            to: to.to_string(),
            subject: subject.to_string(),
            folder: folder.map(str::to_string),
            body: body.to_string(),
            has_body: !body.is_empty(),
        }
    }

    /// Parsed timestamp of the `date` column, `None` when unparseable
    pub fn date_parsed(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date)
    }

    /// Cheap year key: the first four characters of `date`, or `"unknown"`
    ///
    /// This is a string prefix, not a calendar year; `"abcd-..."` yields
    /// `"abcd"`.
    pub fn year_prefix(&self) -> &str {
        match self.date.char_indices().nth(4) {
            Some((end, _)) => &self.date[..end],
            None if self.date.chars().count() == 4 => &self.date,
            None => UNKNOWN,
        }
    }

    /// Folder name, or `"unknown"` when absent
    pub fn folder_or_unknown(&self) -> &str {
        self.folder.as_deref().unwrap_or(UNKNOWN)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn unknown_domain() -> String {
    UNKNOWN_DOMAIN.to_string()
}

fn domain_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<String>::deserialize(deserializer)? {
        Some(domain) if !domain.is_empty() => domain.to_lowercase(),
        _ => unknown_domain(),
    })
}
