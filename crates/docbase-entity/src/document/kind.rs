//! The `type` discriminator shared by all documents in a collection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical entity kind of a document, e.g. `"User"`.
///
/// Several kinds share one physical collection and are told apart only by
/// this value, which is also the partition key. Repositories assign it;
/// whatever a caller puts here is overwritten on write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DocumentKind(String);

impl DocumentKind {
    /// Create a kind from its tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Borrow the tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no tag has been assigned yet.
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentKind {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
