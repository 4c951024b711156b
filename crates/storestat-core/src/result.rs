//! Convenience result type alias for StoreStat.

use crate::error::AppError;

/// A specialized `Result` type for StoreStat operations.
pub type AppResult<T> = Result<T, AppError>;
