//! Opaque concurrency token assigned by the document store.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version marker for optimistic-concurrency guarded writes.
///
/// A fresh value is minted by the store on every insert and replace.
/// Callers only ever compare tokens for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ETag(String);

impl ETag {
    /// Mint a new random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap a token received from the store or a client.
    ///
    /// Surrounding double quotes (as sent in an HTTP `If-Match` header)
    /// are stripped.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim().trim_matches('"');
        Self(trimmed.to_string())
    }

    /// Borrow the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
