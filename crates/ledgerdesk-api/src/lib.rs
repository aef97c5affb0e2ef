//! # ledgerdesk-api
//!
//! HTTP API layer for LedgerDesk built on Axum.
//!
//! Provides the manual reminder trigger, reminder rule administration,
//! notification endpoints, health checks, JWT extraction, role guards,
//! and error mapping.

pub mod app;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use state::AppState;
