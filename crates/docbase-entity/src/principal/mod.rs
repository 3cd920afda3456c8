//! Identity snapshots embedded in documents.

pub mod model;

pub use model::Principal;
