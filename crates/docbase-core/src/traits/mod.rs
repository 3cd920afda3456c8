//! Core traits defined in `docbase-core` and implemented by other crates.

pub mod store;

pub use store::DocumentStore;
