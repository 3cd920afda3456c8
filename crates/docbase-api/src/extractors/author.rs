//! `Author` extractor: the principal creating a document.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use docbase_entity::Principal;

use super::header_str;

const PRINCIPAL_ID: &str = "x-principal-id";
const PRINCIPAL_NAME: &str = "x-principal-name";
const PRINCIPAL_EMAIL: &str = "x-principal-email";

/// The caller's identity as forwarded by an upstream gateway.
///
/// `None` when no `X-Principal-Id` header is present. The name falls back
/// to the id.
#[derive(Debug, Clone, Default)]
pub struct Author(pub Option<Principal>);

impl<S> FromRequestParts<S> for Author
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;
        let principal = header_str(headers, PRINCIPAL_ID).map(|id| {
            let name = header_str(headers, PRINCIPAL_NAME).unwrap_or(id);
            let principal = Principal::new(id, name);
            match header_str(headers, PRINCIPAL_EMAIL) {
                Some(email) => principal.with_email(email),
                None => principal,
            }
        });
        Ok(Self(principal))
    }
}
