//! Page results returned by typed repositories.

use serde::{Deserialize, Serialize};

use super::continuation::ContinuationToken;

/// One page of typed results.
///
/// `continuation` is `Some` exactly when `has_more` is true. Callers start
/// with no token, pass back whatever token they were last given, and stop
/// when a page arrives without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Token for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation: Option<ContinuationToken>,
    /// Whether another page follows.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page; `has_more` is derived from the token.
    pub fn new(items: Vec<T>, continuation: Option<ContinuationToken>) -> Self {
        let has_more = continuation.is_some();
        Self {
            items,
            continuation,
            has_more,
        }
    }

    /// An empty final page.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }
}
