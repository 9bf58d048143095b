/// Share URL and share query composition

use crate::host::normalize_host;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the share-intent URL for a host; the query is appended verbatim
///
/// Returns `None` when the host does not normalize to anything.
pub fn share_url(host: &str, query: &str) -> Option<String> {
    let host = normalize_host(host)?;
    Some(format!("https://{}/share{}", host, query))
}

/// Build `?text=...&hashtags=...`, omitting empty parts
///
/// Hashtags are comma-joined before encoding, so commas arrive as `%2C`.
pub fn share_query(text: &str, hashtags: &[String]) -> String {
    let mut query = String::new();

    if !text.is_empty() {
        query.push_str("?text=");
        query.extend(utf8_percent_encode(text, URI_COMPONENT));
    }

    if !hashtags.is_empty() {
        query.push(if query.is_empty() { '?' } else { '&' });
        query.push_str("hashtags=");
        query.extend(utf8_percent_encode(&hashtags.join(","), URI_COMPONENT));
    }

    query
}
