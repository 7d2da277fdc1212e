//! Convenience result type alias for Bookit.

use crate::error::AppError;

/// A specialized `Result` type for Bookit operations.
pub type AppResult<T> = Result<T, AppError>;
