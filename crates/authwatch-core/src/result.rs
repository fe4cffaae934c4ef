//! Convenience result type alias for AuthWatch.

use crate::error::AppError;

/// A specialized `Result` type for AuthWatch operations.
pub type AppResult<T> = Result<T, AppError>;
