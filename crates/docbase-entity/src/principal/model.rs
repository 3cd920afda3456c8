//! Principal snapshot model.

use serde::{Deserialize, Serialize};

/// Identity of the caller that created a document, copied by value.
///
/// This is not a live reference: renaming the principal later does not
/// change documents that already embed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Stable principal identifier.
    pub id: String,
    /// Display name at creation time.
    pub name: String,
    /// Email at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Principal {
    /// Create a principal snapshot.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
