//! Keyset continuation tokens for paged queries.
//!
//! A token is the URL-safe base64 encoding of a [`Cursor`]: the sort key
//! and id of the last document on the previous page, plus the sort it was
//! produced for. Callers treat it as opaque.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sorting::{SortDirection, SortSpec};
use crate::error::AppError;

/// Opaque cursor handed back verbatim to fetch the next page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wrap a token received from a client. Blank input yields `None`.
    pub fn from_client(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    /// Borrow the encoded token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded position in an ordered partition scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Sort field the token was produced for.
    #[serde(rename = "f")]
    pub sort_field: String,
    /// Sort direction the token was produced for.
    #[serde(rename = "o")]
    pub direction: SortDirection,
    /// Sort key of the last document returned.
    #[serde(rename = "k")]
    pub key: Value,
    /// Id of the last document returned (tie breaker).
    #[serde(rename = "i")]
    pub id: String,
}

impl Cursor {
    /// Build the cursor positioned after a document.
    pub fn after(sort: &SortSpec, key: Value, id: impl Into<String>) -> Self {
        Self {
            sort_field: sort.path.to_string(),
            direction: sort.direction,
            key,
            id: id.into(),
        }
    }

    /// Encode into an opaque token.
    pub fn encode(&self) -> Result<ContinuationToken, AppError> {
        let json = serde_json::to_vec(self)?;
        Ok(ContinuationToken(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode a token and check that it belongs to `sort`.
    pub fn decode(token: &ContinuationToken, sort: &SortSpec) -> Result<Self, AppError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.as_str())
            .map_err(|e| AppError::validation(format!("Malformed continuation token: {e}")))?;
        let cursor: Self = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::validation(format!("Malformed continuation token: {e}")))?;

        if cursor.sort_field != sort.path.to_string() || cursor.direction != sort.direction {
            return Err(AppError::validation(format!(
                "Continuation token was issued for ORDER BY {} {}, not {} {}",
                cursor.sort_field, cursor.direction, sort.path, sort.direction
            )));
        }

        Ok(cursor)
    }
}
