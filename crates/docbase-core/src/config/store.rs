//! Document store configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which [`DocumentStore`](crate::traits::DocumentStore) backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL `JSONB` rows.
    Postgres,
    /// In-process store, lost on restart.
    #[default]
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Settings shared by every typed repository over the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Name of the physical collection all document kinds share.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Upper bound on items returned by one page fetch.
    #[serde(default = "default_max_item_count")]
    pub max_item_count: u32,
    /// Run pending migrations on startup (postgres only).
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            collection: default_collection(),
            max_item_count: default_max_item_count(),
            run_migrations: default_true(),
        }
    }
}

fn default_collection() -> String {
    "documents".to_string()
}

fn default_max_item_count() -> u32 {
    100
}

fn default_true() -> bool {
    true
}
