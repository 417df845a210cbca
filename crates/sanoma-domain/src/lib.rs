//! Sanoma Domain Layer
//!
//! This crate defines the canonical shape of one extracted email record and
//! the fields derived from it. Every other crate in the workspace depends on
//! it; it performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Record**: one email's flattened representation, immutable once built
//! - **Domain**: the lowercased part of the sender address after `@`, with
//!   the sentinels [`UNKNOWN_DOMAIN`] and [`MALFORMED_DOMAIN`]
//! - **Timestamp**: the first 19 characters of the `date` column, parsed as
//!   `YYYY-MM-DD HH:MM:SS`; unparseable dates yield `None`, never an error

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod record;
pub mod timestamp;

// Re-exports for convenience
pub use address::{canonical_message_id, extract_domain, MALFORMED_DOMAIN, UNKNOWN_DOMAIN};
pub use record::{EmailRecord, UNKNOWN};
pub use timestamp::{parse_timestamp, TIMESTAMP_FORMAT};
