//! Overdue invoice scanner.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::customer::Customer;
use ledgerdesk_entity::invoice::Invoice;

use crate::stores::InvoiceStore;

/// A pending invoice past its due date, as seen by one run.
#[derive(Debug, Clone)]
pub struct OverdueInvoice {
    /// The overdue invoice.
    pub invoice: Invoice,
    /// Its customer.
    pub customer: Customer,
    /// Whole days past due as of the run date. Always >= 1.
    pub days_overdue: i64,
}

/// Computes which invoices are overdue, and by how many days, for a run.
pub struct OverdueScanner {
    invoices: Arc<dyn InvoiceStore>,
}

impl OverdueScanner {
    /// Create a new scanner over the given invoice store.
    pub fn new(invoices: Arc<dyn InvoiceStore>) -> Self {
        Self { invoices }
    }

    /// Every pending invoice whose due date is strictly before `today`.
    ///
    /// All-or-nothing: a store failure aborts the scan, no partial list is
    /// ever returned.
    pub async fn scan(&self, today: NaiveDate) -> AppResult<Vec<OverdueInvoice>> {
        let pending = self.invoices.pending_due_before(today).await?;

        let overdue: Vec<OverdueInvoice> = pending
            .into_iter()
            .map(|(invoice, customer)| {
                let days_overdue = invoice.days_past_due(today);
                OverdueInvoice {
                    invoice,
                    customer,
                    days_overdue,
                }
            })
            .collect();

        debug!(count = overdue.len(), %today, "Overdue scan finished");
        Ok(overdue)
    }
}
