//! Per-run dispatch summary.

use chrono::NaiveDate;
use serde::Serialize;

/// One evaluated (invoice, threshold) pair in the run report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunEntry {
    /// Human-facing invoice number.
    pub invoice_number: String,
    /// Whole days past due as of the run date.
    pub days_overdue: i64,
    /// Whether a reminder was dispatched for this pair in this run.
    pub sent: bool,
}

/// Outcome of one scan-and-dispatch run. Ephemeral: returned to the
/// caller and logged, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// The evaluation date of the run.
    pub run_date: NaiveDate,
    /// One entry per satisfied (invoice, threshold) pair, in evaluation
    /// order.
    pub entries: Vec<RunEntry>,
    /// Pairs dispatched this run.
    pub sent_count: usize,
    /// Pairs skipped because the ledger already had them.
    pub skipped_count: usize,
    /// Pairs that failed mid-dispatch.
    pub failed_count: usize,
}

impl RunSummary {
    /// An empty summary for the given run date.
    pub fn new(run_date: NaiveDate) -> Self {
        Self {
            run_date,
            entries: Vec::new(),
            sent_count: 0,
            skipped_count: 0,
            failed_count: 0,
        }
    }

    /// Record a dispatched pair.
    pub fn record_sent(&mut self, invoice_number: &str, days_overdue: i64) {
        self.entries.push(RunEntry {
            invoice_number: invoice_number.to_string(),
            days_overdue,
            sent: true,
        });
        self.sent_count += 1;
    }

    /// Record a pair skipped by the de-duplication ledger.
    pub fn record_skipped(&mut self, invoice_number: &str, days_overdue: i64) {
        self.entries.push(RunEntry {
            invoice_number: invoice_number.to_string(),
            days_overdue,
            sent: false,
        });
        self.skipped_count += 1;
    }

    /// Record a pair that failed mid-dispatch.
    pub fn record_failed(&mut self, invoice_number: &str, days_overdue: i64) {
        self.entries.push(RunEntry {
            invoice_number: invoice_number.to_string(),
            days_overdue,
            sent: false,
        });
        self.failed_count += 1;
    }
}
