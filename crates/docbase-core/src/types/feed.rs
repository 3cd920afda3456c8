//! Request and response shapes exchanged with a document store.

use serde_json::Value;

use super::continuation::{ContinuationToken, Cursor};
use super::etag::ETag;
use super::sorting::SortSpec;
use crate::error::AppError;

/// Field name under which the concurrency token is exposed in a body.
pub const ETAG_FIELD: &str = "_etag";

/// A document as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Document id, unique within its partition.
    pub id: String,
    /// Partition key value.
    pub partition_key: String,
    /// Current concurrency token.
    pub etag: ETag,
    /// JSON body without the concurrency token.
    pub body: Value,
}

impl StoredDocument {
    /// Consume into the JSON body with `_etag` injected.
    pub fn into_body(self) -> Value {
        let mut body = self.body;
        if let Value::Object(map) = &mut body {
            map.insert(ETAG_FIELD.to_string(), Value::String(self.etag.to_string()));
        }
        body
    }
}

/// An ordered scan over one partition.
#[derive(Debug, Clone)]
pub struct DocumentQuery {
    /// Partition to scan.
    pub partition_key: String,
    /// Ordering; ties are broken by id in the same direction.
    pub sort: SortSpec,
}

/// Paging options for one query round trip.
#[derive(Debug, Clone, Default)]
pub struct FeedOptions {
    /// Maximum number of documents to return.
    pub max_item_count: u32,
    /// Resume after this position; `None` starts at the beginning.
    pub continuation: Option<ContinuationToken>,
}

/// One page of query results.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    /// Documents on this page, in query order.
    pub documents: Vec<StoredDocument>,
    /// Present if and only if more documents follow.
    pub continuation: Option<ContinuationToken>,
}

impl FeedPage {
    /// Build a page from a result set fetched with one extra row.
    ///
    /// Backends request `max_item_count + 1` rows; a surplus row proves
    /// another page exists and is dropped here.
    pub fn from_overfetch(
        mut documents: Vec<StoredDocument>,
        max_item_count: u32,
        sort: &SortSpec,
    ) -> Result<Self, AppError> {
        let limit = max_item_count as usize;
        if documents.len() <= limit {
            return Ok(Self {
                documents,
                continuation: None,
            });
        }

        documents.truncate(limit);
        let continuation = match documents.last() {
            Some(last) => Some(Cursor::after(sort, sort.path.lookup(&last.body), &last.id).encode()?),
            None => None,
        };

        Ok(Self {
            documents,
            continuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, name: &str) -> StoredDocument {
        StoredDocument {
            id: id.to_string(),
            partition_key: "User".to_string(),
            etag: ETag::new("e"),
            body: json!({"id": id, "name": name}),
        }
    }

    #[test]
    fn test_overfetch_sets_continuation() {
        let sort = SortSpec::parse("name", "asc").unwrap();
        let page =
            FeedPage::from_overfetch(vec![doc("1", "a"), doc("2", "b"), doc("3", "c")], 2, &sort)
                .unwrap();
        assert_eq!(page.documents.len(), 2);
        let token = page.continuation.expect("more pages");
        let cursor = Cursor::decode(&token, &sort).unwrap();
        assert_eq!(cursor.id, "2");
        assert_eq!(cursor.key, json!("b"));
    }

    #[test]
    fn test_exact_fit_has_no_continuation() {
        let sort = SortSpec::parse("name", "asc").unwrap();
        let page = FeedPage::from_overfetch(vec![doc("1", "a"), doc("2", "b")], 2, &sort).unwrap();
        assert_eq!(page.documents.len(), 2);
        assert!(page.continuation.is_none());
    }

    #[test]
    fn test_into_body_injects_etag() {
        let body = doc("1", "a").into_body();
        assert_eq!(body[ETAG_FIELD], json!("e"));
    }
}
