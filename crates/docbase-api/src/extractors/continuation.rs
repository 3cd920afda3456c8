//! `ContinuationHeader` extractor: the paging token a client echoes back.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use docbase_core::types::ContinuationToken;

use super::header_str;
use crate::CONTINUATION_HEADER;

/// Continuation token from the request header, if any.
///
/// A missing or blank header starts from the first page. Whether a present
/// token is well formed is decided by the store when it is decoded.
#[derive(Debug, Clone, Default)]
pub struct ContinuationHeader(pub Option<ContinuationToken>);

impl<S> FromRequestParts<S> for ContinuationHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            header_str(&parts.headers, CONTINUATION_HEADER).and_then(ContinuationToken::from_client),
        ))
    }
}
