//! PostgreSQL access layer for LedgerDesk.
//!
//! Provides the connection pool, embedded migrations, and one repository
//! struct per table. Repositories are thin: they own a `PgPool` clone and
//! translate sqlx errors into [`ledgerdesk_core::AppError`].

pub mod connection;
pub mod migration;
pub mod repositories;
