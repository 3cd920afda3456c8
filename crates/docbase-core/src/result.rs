//! Convenience result type alias for docbase.

use crate::error::AppError;

/// A specialized `Result` type for docbase operations.
pub type AppResult<T> = Result<T, AppError>;
