//! # docbase-api
//!
//! HTTP API layer for docbase built on Axum.
//!
//! Provides a generic document controller mounted once per document kind,
//! health checks, middleware (CORS, compression, request logging),
//! extractors, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;

/// Request/response header carrying the paging continuation token.
pub const CONTINUATION_HEADER: &str = "x-requestcontinuationtoken";
