//! Overdue-invoice reminder engine.
//!
//! This crate implements the scan-and-dispatch cycle that turns overdue
//! invoices into tiered admin reminders:
//! - [`scanner::OverdueScanner`] finds pending invoices past their due date
//! - [`dispatcher::ReminderDispatcher`] matches them against the enabled
//!   reminder rules, deduplicates through the ledger, and performs the
//!   side effects
//! - [`engine::ReminderEngine`] composes both behind a single `run` call
//!   and owns the one-run-at-a-time gate
//!
//! The collaborating stores are consumed through the port traits in
//! [`stores`], with sqlx-backed adapters for the repository structs.

pub mod dispatcher;
pub mod engine;
pub mod notifier;
pub mod scanner;
pub mod stores;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::ReminderEngine;
pub use notifier::{LogNotifier, Notifier, ReminderMessage};
pub use summary::{RunEntry, RunSummary};
