//! Convenience result type alias for TableHub.

use crate::error::AppError;

/// A specialized `Result` type for TableHub operations.
pub type AppResult<T> = Result<T, AppError>;
