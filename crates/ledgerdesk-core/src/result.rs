//! Application result alias.

use crate::error::AppError;

/// Result type used across all LedgerDesk crates.
pub type AppResult<T> = Result<T, AppError>;
