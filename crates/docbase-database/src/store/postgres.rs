//! PostgreSQL document store over a shared `documents` table.
//!
//! Bodies are stored as `JSONB`. Ordering uses `COALESCE(body #> path,
//! 'null')` so missing fields sort with `null`, matching the in-memory
//! backend's JSON ordering.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;

use docbase_core::error::{AppError, ErrorKind};
use docbase_core::result::AppResult;
use docbase_core::traits::DocumentStore;
use docbase_core::types::{
    Cursor, DocumentQuery, ETag, FeedOptions, FeedPage, SortDirection, StoredDocument,
};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

const RETURNING: &str = "RETURNING id, partition_key, etag, body";

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    partition_key: String,
    etag: String,
    body: Json<Value>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            partition_key: row.partition_key,
            etag: ETag::new(row.etag),
            body: row.body.0,
        }
    }
}

/// Map a sqlx error into the application taxonomy.
fn map_sqlx(err: sqlx::Error, context: &str) -> AppError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => AppError::with_source(
            ErrorKind::ServiceUnavailable,
            format!("{context}: document store unavailable"),
            err,
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AppError::with_source(
                ErrorKind::Conflict,
                format!("{context}: document already exists"),
                err,
            )
        }
        _ => AppError::with_source(ErrorKind::Database, format!("{context}: {err}"), err),
    }
}

/// Build the page query for a sort direction, with or without a keyset
/// predicate.
///
/// Binds: `$1` collection, `$2` partition key, `$3` sort path (`text[]`),
/// `$4` limit, then `$5` cursor key (`jsonb`) and `$6` cursor id when
/// resuming.
fn page_sql(direction: SortDirection, resume: bool) -> String {
    let key = "COALESCE(body #> $3, 'null'::jsonb)";
    let dir = direction.as_sql();
    let keyset = if resume {
        let cmp = match direction {
            SortDirection::Asc => ">",
            SortDirection::Desc => "<",
        };
        format!(" AND ({key}, id COLLATE \"C\") {cmp} ($5::jsonb, $6::text COLLATE \"C\")")
    } else {
        String::new()
    };

    format!(
        "SELECT id, partition_key, etag, body FROM documents \
         WHERE collection = $1 AND partition_key = $2{keyset} \
         ORDER BY {key} {dir}, id COLLATE \"C\" {dir} \
         LIMIT $4"
    )
}

/// Document store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
        body: Value,
    ) -> AppResult<StoredDocument> {
        let started = Instant::now();
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "INSERT INTO documents (collection, partition_key, id, etag, body) \
             VALUES ($1, $2, $3, $4, $5) {RETURNING}"
        ))
        .bind(collection)
        .bind(partition_key)
        .bind(id)
        .bind(ETag::generate().as_str())
        .bind(Json(&body))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to insert document"))?;

        debug!(
            collection,
            partition_key,
            id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pg insert"
        );
        Ok(row.into())
    }

    async fn read(
        &self,
        collection: &str,
        partition_key: &str,
        id: &str,
    ) -> AppResult<Option<StoredDocument>> {
        let started = Instant::now();
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, partition_key, etag, body FROM documents \
             WHERE collection = $1 AND partition_key = $2 AND id = $3",
        )
        .bind(collection)
        .bind(partition_key)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to read document"))?;

        debug!(
            collection,
            partition_key,
            id,
            found = row.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pg read"
        );
        Ok(row.map(Into::into))
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

        let started = Instant::now();
        let sql = page_sql(sort.direction, cursor.is_some());
        let mut statement = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(&query.partition_key)
            .bind(sort.path.segments().to_vec())
            .bind(i64::from(options.max_item_count) + 1);

        if let Some(cursor) = &cursor {
            statement = statement.bind(Json(&cursor.key)).bind(&cursor.id);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to query documents"))?;

        debug!(
            collection,
            partition_key = %query.partition_key,
            sort = %sort.path,
            direction = %sort.direction,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pg query"
        );

        let documents = rows.into_iter().map(Into::into).collect();
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
        let started = Instant::now();
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "UPDATE documents SET body = $5, etag = $6, updated_at = NOW() \
             WHERE collection = $1 AND partition_key = $2 AND id = $3 AND etag = $4 \
             {RETURNING}"
        ))
        .bind(collection)
        .bind(partition_key)
        .bind(id)
        .bind(if_match.as_str())
        .bind(Json(&body))
        .bind(ETag::generate().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to replace document"))?;

        debug!(
            collection,
            partition_key,
            id,
            applied = row.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pg replace"
        );

        match row {
            Some(row) => Ok(row.into()),
            // Nothing matched: tell a stale token apart from a vanished row.
            None => match self.read(collection, partition_key, id).await? {
                Some(_) => Err(AppError::conflict(format!(
                    "Document '{id}' was modified concurrently (etag mismatch)"
                ))),
                None => Err(AppError::not_found(format!(
                    "Document '{id}' not found in partition '{partition_key}'"
                ))),
            },
        }
    }

    async fn delete(&self, collection: &str, partition_key: &str, id: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM documents WHERE collection = $1 AND partition_key = $2 AND id = $3",
        )
        .bind(collection)
        .bind(partition_key)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to delete document"))?;

        let removed = result.rows_affected() > 0;
        debug!(collection, partition_key, id, removed, "pg delete");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| map_sqlx(e, "Health check failed"))
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
