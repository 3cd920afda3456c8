//! Route handlers.

pub mod documents;
pub mod health;
