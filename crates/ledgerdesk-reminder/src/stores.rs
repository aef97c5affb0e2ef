//! Port traits for the stores the engine collaborates with, plus the
//! sqlx-backed adapter impls.
//!
//! The engine only ever sees these traits; production wiring hands it the
//! repository structs, tests hand it in-memory stand-ins.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use ledgerdesk_core::result::AppResult;
use ledgerdesk_database::repositories::{
    InvoiceRepository, NotificationRepository, ReminderRecordRepository, ReminderRuleRepository,
};
use ledgerdesk_entity::customer::Customer;
use ledgerdesk_entity::invoice::Invoice;
use ledgerdesk_entity::notification::NewNotification;
use ledgerdesk_entity::reminder::ReminderRule;

/// Read access to invoices. Scan failures are fatal for the run.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Every pending invoice with `due_date < date`, paired with its
    /// customer.
    async fn pending_due_before(&self, date: NaiveDate) -> AppResult<Vec<(Invoice, Customer)>>;
}

/// Read access to the administrator-configured reminder policy.
#[async_trait]
pub trait ReminderPolicyStore: Send + Sync {
    /// The enabled rules, ascending by threshold.
    async fn enabled_rules(&self) -> AppResult<Vec<ReminderRule>>;
}

/// The dispatch ledger — the de-duplication source of truth.
#[async_trait]
pub trait ReminderLedger: Send + Sync {
    /// Whether a reminder was already dispatched for this pair.
    async fn exists(&self, invoice_id: Uuid, threshold_days: i32) -> AppResult<bool>;

    /// Claim the pair. Returns `false` if it was recorded concurrently.
    async fn record(
        &self,
        invoice_id: Uuid,
        threshold_days: i32,
        message_sent: bool,
    ) -> AppResult<bool>;
}

/// Write access to the dashboard notification feed.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Store a notification.
    async fn publish(&self, notification: NewNotification) -> AppResult<()>;
}

#[async_trait]
impl InvoiceStore for InvoiceRepository {
    async fn pending_due_before(&self, date: NaiveDate) -> AppResult<Vec<(Invoice, Customer)>> {
        self.find_pending_due_before(date).await
    }
}

#[async_trait]
impl ReminderPolicyStore for ReminderRuleRepository {
    async fn enabled_rules(&self) -> AppResult<Vec<ReminderRule>> {
        self.find_enabled().await
    }
}

#[async_trait]
impl ReminderLedger for ReminderRecordRepository {
    async fn exists(&self, invoice_id: Uuid, threshold_days: i32) -> AppResult<bool> {
        ReminderRecordRepository::exists(self, invoice_id, threshold_days).await
    }

    async fn record(
        &self,
        invoice_id: Uuid,
        threshold_days: i32,
        message_sent: bool,
    ) -> AppResult<bool> {
        self.insert(invoice_id, threshold_days, message_sent).await
    }
}

#[async_trait]
impl NotificationSink for NotificationRepository {
    async fn publish(&self, notification: NewNotification) -> AppResult<()> {
        self.create(&notification).await.map(|_| ())
    }
}
