//! `IfMatch` extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::IF_MATCH;
use axum::http::request::Parts;

use docbase_core::types::ETag;

use super::header_str;

/// Expected concurrency token from the `If-Match` header.
///
/// Accepts the quoted form (`"abc"`) and weak validators (`W/"abc"`).
/// `*` matches any version and is treated as absent.
#[derive(Debug, Clone, Default)]
pub struct IfMatch(pub Option<ETag>);

impl<S> FromRequestParts<S> for IfMatch
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            header_str(&parts.headers, IF_MATCH.as_str())
                .filter(|v| *v != "*")
                .map(|v| ETag::new(v.strip_prefix("W/").unwrap_or(v))),
        ))
    }
}
