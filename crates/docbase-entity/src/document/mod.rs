//! Document envelope and kind discriminator.

pub mod kind;
pub mod model;
pub mod timestamp;

pub use kind::DocumentKind;
pub use model::{Document, DocumentPayload};
