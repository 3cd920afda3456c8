//! The seam between repositories and the external document store.

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::{DocumentQuery, ETag, FeedOptions, FeedPage, StoredDocument};

/// A partitioned JSON document collection.
///
/// Every call is one round trip to the store. Implementations own
/// concurrency-token generation and the compare-and-swap in
/// [`replace`](Self::replace); repositories never serialize writers
/// themselves. One instance is shared by every typed repository.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug + 'static {
    /// Insert a new document. Fails with `Conflict` if `(partition_key, id)`
    /// already exists in the collection.
    async fn insert(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        body: Value,
    ) -> AppResult<StoredDocument>;

    /// Point read by partition and id.
    async fn read(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
    ) -> AppResult<Option<StoredDocument>>;

    /// Fetch one page of an ordered partition scan.
    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
        options: &FeedOptions,
    ) -> AppResult<FeedPage>;

    /// Replace a document if its current token equals `if_match`.
    ///
    /// Fails with `Conflict` on a token mismatch and `NotFound` if the
    /// document no longer exists.
    async fn replace(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        body: Value,
        if_match: &ETag,
    ) -> AppResult<StoredDocument>;

    /// Delete by partition and id. Returns `false` when nothing matched.
    async fn delete(&self, collection: &str, partition_key: &str, id: &str) -> AppResult<bool>;

    /// Check store connectivity.
    async fn health_check(&self) -> AppResult<bool>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Release connections. Called once at shutdown.
    async fn close(&self) {}
}
