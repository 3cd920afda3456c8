//! # docbase-core
//!
//! Core crate for docbase. Contains the document store trait, configuration
//! schemas, continuation/sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other docbase crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
