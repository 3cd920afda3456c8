//! Custom Axum extractors.

pub mod author;
pub mod continuation;
pub mod if_match;
pub mod validated;

pub use author::Author;
pub use continuation::ContinuationHeader;
pub use if_match::IfMatch;
pub use validated::ValidatedDocument;

use axum::http::HeaderMap;

/// Read a header as a trimmed, non-empty string.
pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
