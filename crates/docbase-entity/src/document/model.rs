//! Document envelope model.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use docbase_core::types::ETag;

use super::kind::DocumentKind;
use crate::principal::Principal;

/// Bound satisfied by every payload a repository can store.
pub trait DocumentPayload:
    Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static
{
}

impl<T> DocumentPayload for T where
    T: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static
{
}

/// A record in the shared collection: envelope fields plus a payload,
/// serialized as one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    /// Primary key within the partition. Empty until assigned.
    #[serde(default)]
    pub id: String,
    /// Kind discriminator and partition key.
    #[serde(rename = "type", default)]
    pub kind: DocumentKind,
    /// Creation time, immutable once stored.
    #[serde(
        default,
        with = "super::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(
        default,
        with = "super::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<DateTime<Utc>>,
    /// Snapshot of the principal that created the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Principal>,
    /// Concurrency token from the store.
    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<ETag>,
    /// Kind-specific fields.
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Document<T> {
    /// A draft with no envelope fields set.
    pub fn new(payload: T) -> Self {
        Self {
            id: String::new(),
            kind: DocumentKind::default(),
            created_at: None,
            modified_at: None,
            created_by: None,
            etag: None,
            payload,
        }
    }

    /// A draft addressed to an existing id, for updates.
    pub fn with_id(id: impl Into<String>, payload: T) -> Self {
        Self {
            id: id.into(),
            ..Self::new(payload)
        }
    }

    /// Set the expected concurrency token.
    pub fn with_etag(mut self, etag: ETag) -> Self {
        self.etag = Some(etag);
        self
    }
}
