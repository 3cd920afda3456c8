//! In-process document store.
//!
//! Same observable semantics as the PostgreSQL backend: partition-scoped
//! point operations, etag compare-and-swap on replace, and keyset
//! continuation over a `(sort key, id)` ordering. Contents are lost on
//! restart.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use docbase_core::error::AppError;
use docbase_core::result::AppResult;
use docbase_core::traits::DocumentStore;
use docbase_core::types::{
    Cursor, DocumentQuery, ETag, FeedOptions, FeedPage, SortDirection, StoredDocument,
};

use super::json_order::compare_json;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocumentKey {
    collection: String,
    partition_key: String,
    id: String,
}

impl DocumentKey {
    fn new(collection: &str, partition_key: &str, id: &str) -> Self {
        Self {
            collection: collection.to_string(),
            partition_key: partition_key.to_string(),
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    etag: ETag,
    body: Value,
}

/// Document store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentKey, Entry>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn stored(key: &DocumentKey, entry: &Entry) -> StoredDocument {
    StoredDocument {
        id: key.id.clone(),
        partition_key: key.partition_key.clone(),
        etag: entry.etag.clone(),
        body: entry.body.clone(),
    }
}

/// Order two `(key, id)` pairs in the query's direction.
fn order(direction: SortDirection, a: (&Value, &str), b: (&Value, &str)) -> Ordering {
    let ascending = compare_json(a.0, b.0).then_with(|| a.1.cmp(b.1));
    match direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        body: Value,
    ) -> AppResult<StoredDocument> {
        let key = DocumentKey::new(collection, partition_key, id);
        let mut documents = self.documents.write().await;

        if documents.contains_key(&key) {
            return Err(AppError::conflict(format!(
                "Document '{id}' already exists in partition '{partition_key}'"
            )));
        }

        let entry = Entry {
            etag: ETag::generate(),
            body,
        };
        let result = stored(&key, &entry);
        documents.insert(key, entry);

        debug!(collection, partition_key, id, "memory insert");
        Ok(result)
    }

    async fn read(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
    ) -> AppResult<Option<StoredDocument>> {
        let key = DocumentKey::new(collection, partition_key, id);
        let documents = self.documents.read().await;
        Ok(documents.get(&key).map(|entry| stored(&key, entry)))
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
        options: &FeedOptions,
    ) -> AppResult<FeedPage> {
        let sort = &query.sort;
        let cursor = options
            .continuation
            .as_ref()
            .map(|token| Cursor::decode(token, sort))
            .transpose()?;

        let documents = self.documents.read().await;
        let mut rows: Vec<(Value, StoredDocument)> = documents
            .iter()
            .filter(|(key, _)| {
                key.collection == collection && key.partition_key == query.partition_key
            })
            .map(|(key, entry)| (sort.path.lookup(&entry.body), stored(key, entry)))
            .collect();
        drop(documents);

        if let Some(cursor) = &cursor {
            rows.retain(|(sort_key, doc)| {
                order(
                    sort.direction,
                    (sort_key, doc.id.as_str()),
                    (&cursor.key, cursor.id.as_str()),
                ) == Ordering::Greater
            });
        }

        rows.sort_by(|(ka, a), (kb, b)| {
            order(sort.direction, (ka, a.id.as_str()), (kb, b.id.as_str()))
        });
        rows.truncate(options.max_item_count as usize + 1);

        debug!(
            collection,
            partition_key = %query.partition_key,
            sort = %sort.path,
            rows = rows.len(),
            "memory query"
        );

        let documents = rows.into_iter().map(|(_, doc)| doc).collect();
        FeedPage::from_overfetch(documents, options.max_item_count, sort)
    }

    async fn replace(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        body: Value,
        if_match: &ETag,
    ) -> AppResult<StoredDocument> {
        let key = DocumentKey::new(collection, partition_key, id);
        let mut documents = self.documents.write().await;

        let entry = documents.get_mut(&key).ok_or_else(|| {
            AppError::not_found(format!(
                "Document '{id}' not found in partition '{partition_key}'"
            ))
        })?;

        if &entry.etag != if_match {
            return Err(AppError::conflict(format!(
                "Document '{id}' was modified concurrently (etag mismatch)"
            )));
        }

        entry.etag = ETag::generate();
        entry.body = body;

        debug!(collection, partition_key, id, "memory replace");
        Ok(stored(&key, entry))
    }

    async fn delete(&self, collection: &str, partition_key: &str, id: &str) -> AppResult<bool> {
        let key = DocumentKey::new(collection, partition_key, id);
        let removed = self.documents.write().await.remove(&key).is_some();
        debug!(collection, partition_key, id, removed, "memory delete");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
