//! Address module - sender domain extraction and message-id canonicalisation

use lazy_static::lazy_static;
use regex::Regex;

/// Domain reported when the sender header is empty
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Domain reported when the sender header holds no recognisable address
pub const MALFORMED_DOMAIN: &str = "malformed";

lazy_static! {
    /// Either a bracketed `<...>` address or a bare `user@domain` token
    static ref ADDRESS: Regex =
        Regex::new(r"<([^>]+)>|([^\s<>]+@[^\s<>]+)").expect("address pattern is valid");
    static ref DOMAIN_PART: Regex =
        Regex::new(r"@([a-zA-Z0-9.-]+)").expect("domain pattern is valid");
}

/// Extract the lowercased sender domain from a raw `From` header
///
/// Returns [`UNKNOWN_DOMAIN`] for an empty header and [`MALFORMED_DOMAIN`]
/// when neither a `<...>` nor a `user@domain` token is present, or the
/// bracketed token carries no `@domain` part.
///
/// # Examples
///
/// ```
/// use sanoma_domain::extract_domain;
///
/// assert_eq!(extract_domain("Jane <jane@Mail.WSU.edu>"), "mail.wsu.edu");
/// assert_eq!(extract_domain(""), "unknown");
/// assert_eq!(extract_domain("no address here"), "malformed");
/// ```
pub fn extract_domain(from: &str) -> String {
    if from.is_empty() {
        return UNKNOWN_DOMAIN.to_string();
    }

    let Some(caps) = ADDRESS.captures(from) else {
        return MALFORMED_DOMAIN.to_string();
    };

    let address = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default();

    DOMAIN_PART
        .captures(address)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| MALFORMED_DOMAIN.to_string())
}

/// Wrap a raw message id in angle brackets
///
/// Empty input stays empty; ids already starting with `<` are kept as-is.
pub fn canonical_message_id(raw: &str) -> String {
    if raw.is_empty() || raw.starts_with('<') {
        raw.to_string()
    } else {
        format!("<{}>", raw)
    }
}
