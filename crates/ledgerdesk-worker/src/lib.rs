//! Scheduled background runs for LedgerDesk.
//!
//! Currently one job: the daily overdue-invoice reminder run.

pub mod scheduler;

pub use scheduler::CronScheduler;
