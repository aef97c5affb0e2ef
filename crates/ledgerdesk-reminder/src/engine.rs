//! Engine facade: one `run` call per scan-and-dispatch cycle, guarded so
//! runs never overlap.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::info;

use ledgerdesk_core::error::AppError;
use ledgerdesk_core::result::AppResult;

use crate::dispatcher::ReminderDispatcher;
use crate::notifier::Notifier;
use crate::scanner::OverdueScanner;
use crate::stores::{InvoiceStore, NotificationSink, ReminderLedger, ReminderPolicyStore};
use crate::summary::RunSummary;

/// The overdue-invoice reminder engine.
///
/// Shared by the daily cron trigger and the manual admin endpoint; both go
/// through [`ReminderEngine::run`], which rejects a trigger while another
/// run holds the gate.
pub struct ReminderEngine {
    scanner: OverdueScanner,
    dispatcher: ReminderDispatcher,
    gate: Mutex<()>,
}

impl ReminderEngine {
    /// Create an engine over the given collaborators.
    pub fn new(
        invoices: Arc<dyn InvoiceStore>,
        policy: Arc<dyn ReminderPolicyStore>,
        ledger: Arc<dyn ReminderLedger>,
        notifications: Arc<dyn NotificationSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            scanner: OverdueScanner::new(invoices),
            dispatcher: ReminderDispatcher::new(policy, ledger, notifications, notifier),
            gate: Mutex::new(()),
        }
    }

    /// Execute one full scan-and-dispatch run for the given date.
    ///
    /// Returns a `Conflict` error if a run is already in progress. A scan
    /// failure aborts the run with zero reminders dispatched; pair-level
    /// failures are absorbed into the summary.
    pub async fn run(&self, today: NaiveDate) -> AppResult<RunSummary> {
        let _guard = self
            .gate
            .try_lock()
            .map_err(|_| AppError::conflict("A reminder run is already in progress"))?;

        info!(%today, "Starting overdue-invoice reminder run");
        let overdue = self.scanner.scan(today).await?;
        info!(overdue = overdue.len(), "Overdue scan complete");

        let summary = self.dispatcher.dispatch(today, &overdue).await?;
        info!(
            sent = summary.sent_count,
            skipped = summary.skipped_count,
            failed = summary.failed_count,
            "Reminder run complete"
        );
        Ok(summary)
    }
}
