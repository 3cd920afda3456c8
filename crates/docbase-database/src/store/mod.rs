//! Document store backends.

pub mod json_order;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use tracing::info;

use docbase_core::config::{AppConfig, StoreBackend};
use docbase_core::result::AppResult;
use docbase_core::traits::DocumentStore;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Build the process-wide store handle selected by `store.backend`.
///
/// Call once at startup and share the returned handle with every typed
/// repository; call [`DocumentStore::close`] once at shutdown.
pub async fn connect_store(config: &AppConfig) -> AppResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.store.run_migrations {
                run_migrations(pool.pool()).await?;
            }
            Arc::new(PgDocumentStore::new(pool.into_pool()))
        }
        StoreBackend::Memory => Arc::new(MemoryDocumentStore::new()),
    };

    info!(
        backend = store.backend_name(),
        collection = %config.store.collection,
        "Document store ready"
    );
    Ok(store)
}
