//! Outbound reminder delivery port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use ledgerdesk_core::result::AppResult;

/// The outbound message for one dispatched reminder.
#[derive(Debug, Clone)]
pub struct ReminderMessage {
    /// Human-facing invoice number.
    pub invoice_number: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer billing e-mail.
    pub customer_email: String,
    /// Whole days past due.
    pub days_overdue: i64,
    /// The reminder tier that fired.
    pub threshold_days: i32,
    /// Amount due.
    pub amount: Decimal,
}

/// Delivery channel for outbound reminders (e-mail, webhook, ...).
///
/// `deliver` returns whether the message actually went out; the dispatcher
/// stores that flag on the ledger row and an out-of-scope delivery worker
/// reconciles `false` rows later. Delivery is best-effort and never blocks
/// a pair from being recorded.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt to deliver the reminder. `Ok(true)` means it went out.
    async fn deliver(&self, message: &ReminderMessage) -> AppResult<bool>;
}

/// Logging stand-in for a real delivery channel.
///
/// Logs the reminder and reports the message as not sent, leaving the
/// ledger row flagged for later reconciliation.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, message: &ReminderMessage) -> AppResult<bool> {
        info!(
            invoice = %message.invoice_number,
            customer = %message.customer_name,
            email = %message.customer_email,
            days_overdue = message.days_overdue,
            threshold_days = message.threshold_days,
            "Reminder e-mail delivery not configured; logging only"
        );
        Ok(false)
    }
}
