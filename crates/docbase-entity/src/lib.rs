//! # docbase-entity
//!
//! Document models for docbase. [`Document`] is the envelope every record
//! in the shared collection carries; the payload type parameter holds the
//! fields specific to one document kind. All models derive `Debug`,
//! `Clone`, `Serialize` and `Deserialize`.

pub mod document;
pub mod principal;
pub mod user;

pub use document::{Document, DocumentKind, DocumentPayload};
pub use principal::Principal;
pub use user::User;
