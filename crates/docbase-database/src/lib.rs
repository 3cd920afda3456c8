//! # docbase-database
//!
//! Document store backends (PostgreSQL and in-memory), connection
//! management, migrations, and the typed [`DocumentRepository`].

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod repository;
pub mod store;

pub use connection::DatabasePool;
pub use repository::DocumentRepository;
pub use store::{MemoryDocumentStore, PgDocumentStore, connect_store};
