//! Shared foundations for LedgerDesk: the unified error type and the
//! application configuration schemas.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
