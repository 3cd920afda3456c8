//! Typed document repository over a shared, partitioned collection.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use docbase_core::config::StoreConfig;
use docbase_core::error::AppError;
use docbase_core::result::AppResult;
use docbase_core::traits::DocumentStore;
use docbase_core::types::{
    ContinuationToken, DocumentQuery, ETAG_FIELD, FeedOptions, Page, SortSpec, StoredDocument,
};
use docbase_entity::{Document, DocumentKind, DocumentPayload, Principal};

/// Provenance fields carried forward from the stored copy on update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Provenance {
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    created_by: Option<Principal>,
}

/// Typed CRUD and paging for one document kind.
///
/// Every instance writes its own [`DocumentKind`] into `type`, which is
/// also the partition key; documents of other kinds in the same collection
/// are invisible to it. The store handle is shared, so cloning a
/// repository or building one per kind is cheap.
pub struct DocumentRepository<T> {
    store: Arc<dyn DocumentStore>,
    collection: String,
    kind: DocumentKind,
    max_item_count: u32,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Clone for DocumentRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection.clone(),
            kind: self.kind.clone(),
            max_item_count: self.max_item_count,
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for DocumentRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentRepository")
            .field("store", &self.store.backend_name())
            .field("collection", &self.collection)
            .field("kind", &self.kind)
            .field("max_item_count", &self.max_item_count)
            .finish()
    }
}

impl<T: DocumentPayload> DocumentRepository<T> {
    /// Create a repository for `kind` over `collection`.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        kind: impl Into<DocumentKind>,
        max_item_count: u32,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            kind: kind.into(),
            max_item_count: max_item_count.max(1),
            _payload: PhantomData,
        }
    }

    /// Create a repository using the shared store settings.
    pub fn from_config(
        store: Arc<dyn DocumentStore>,
        config: &StoreConfig,
        kind: impl Into<DocumentKind>,
    ) -> Self {
        Self::new(store, &config.collection, kind, config.max_item_count)
    }

    /// The kind this repository reads and writes.
    pub fn kind(&self) -> &DocumentKind {
        &self.kind
    }

    /// The physical collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The configured upper bound on page size.
    pub fn max_item_count(&self) -> u32 {
        self.max_item_count
    }

    /// Insert a new document.
    ///
    /// Assigns an id when the draft has none, and overwrites `type`,
    /// `createdAt`, `createdBy` and `modifiedAt` regardless of what the
    /// caller supplied.
    pub async fn add(
        &self,
        mut draft: Document<T>,
        author: Option<Principal>,
    ) -> AppResult<Document<T>> {
        draft.id = if draft.id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            require_id(&draft.id)?.to_string()
        };
        draft.kind = self.kind.clone();
        draft.created_at = Some(Utc::now());
        draft.created_by = author;
        draft.modified_at = None;
        draft.etag = None;

        let body = self.encode(&draft)?;
        let stored = self
            .store
            .insert(&self.collection, self.kind.as_str(), &draft.id, body)
            .await?;

        debug!(kind = %self.kind, id = %stored.id, "Document added");
        self.decode(stored)
    }

    /// Fetch a document by id within this repository's kind.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Document<T>>> {
        let id = require_id(id)?;
        self.store
            .read(&self.collection, self.kind.as_str(), id)
            .await?
            .map(|stored| self.decode(stored))
            .transpose()
    }

    /// Fetch one page of this kind's documents.
    ///
    /// `page_size` falls back to the configured maximum when it is zero,
    /// absent, or not below the maximum.
    pub async fn get_page(
        &self,
        sort: &SortSpec,
        continuation: Option<&ContinuationToken>,
        page_size: Option<u32>,
    ) -> AppResult<Page<Document<T>>> {
        let query = DocumentQuery {
            partition_key: self.kind.as_str().to_string(),
            sort: sort.clone(),
        };
        let options = FeedOptions {
            max_item_count: self.effective_page_size(page_size),
            continuation: continuation.cloned(),
        };

        let page = self.store.query(&self.collection, &query, &options).await?;
        let items = page
            .documents
            .into_iter()
            .map(|stored| self.decode(stored))
            .collect::<AppResult<Vec<_>>>()?;

        debug!(
            kind = %self.kind,
            sort = %sort.path,
            direction = %sort.direction,
            count = items.len(),
            has_more = page.continuation.is_some(),
            "Page fetched"
        );
        Ok(Page::new(items, page.continuation))
    }

    /// Replace an existing document, keeping its provenance.
    ///
    /// Returns `Ok(None)` without writing when no document of this kind has
    /// the id. The write is conditional on the concurrency token: the
    /// caller's `_etag` when present, otherwise the one just read. A
    /// mismatch is a `Conflict` and is never retried here.
    pub async fn update(&self, mut document: Document<T>) -> AppResult<Option<Document<T>>> {
        let id = require_id(&document.id)?.to_string();
        document.id.clone_from(&id);

        let Some(current) = self
            .store
            .read(&self.collection, self.kind.as_str(), &id)
            .await?
        else {
            debug!(kind = %self.kind, id = %id, "Update target not found");
            return Ok(None);
        };

        if let Some(expected) = &document.etag {
            if expected != &current.etag {
                warn!(kind = %self.kind, id = %id, "Update rejected: stale etag");
                return Err(AppError::conflict(format!(
                    "Document '{id}' has changed since it was read"
                )));
            }
        }

        let provenance: Provenance = serde_json::from_value(current.body.clone())?;
        document.kind = self.kind.clone();
        document.created_at = provenance.created_at;
        document.created_by = provenance.created_by;
        document.modified_at = Some(Utc::now());
        document.etag = None;

        let body = self.encode(&document)?;
        let stored = self
            .store
            .replace(
                &self.collection,
                self.kind.as_str(),
                &id,
                body,
                &current.etag,
            )
            .await
            .inspect_err(|e| {
                if e.is_conflict() {
                    warn!(kind = %self.kind, id = %id, "Update lost a concurrent write race");
                }
            })?;

        debug!(kind = %self.kind, id = %id, "Document updated");
        self.decode(stored).map(Some)
    }

    /// Delete a document of this kind. Returns `false` when absent.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let id = require_id(id)?;
        let deleted = self
            .store
            .delete(&self.collection, self.kind.as_str(), id)
            .await?;
        debug!(kind = %self.kind, id, deleted, "Document delete");
        Ok(deleted)
    }

    fn effective_page_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(n) if n > 0 && n < self.max_item_count => n,
            _ => self.max_item_count,
        }
    }

    fn encode(&self, document: &Document<T>) -> AppResult<Value> {
        let mut body = serde_json::to_value(document)?;
        match &mut body {
            Value::Object(map) => {
                map.remove(ETAG_FIELD);
                Ok(body)
            }
            _ => Err(AppError::validation(format!(
                "{} payload must serialize to a JSON object",
                self.kind
            ))),
        }
    }

    fn decode(&self, stored: StoredDocument) -> AppResult<Document<T>> {
        Ok(serde_json::from_value(stored.into_body())?)
    }
}

/// Normalise a document id: trimmed, non-empty, usable as one URL path
/// segment.
fn require_id(id: &str) -> AppResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::validation("Document id must not be empty"));
    }
    if let Some(c) = id.chars().find(|c| *c == '/' || c.is_control()) {
        return Err(AppError::validation(format!(
            "Document id must not contain {c:?}"
        )));
    }
    Ok(id)
}
