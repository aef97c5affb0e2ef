//! In-memory stand-ins for the engine's collaborator ports, shared by the
//! unit tests in this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, Notify};
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::customer::Customer;
use ledgerdesk_entity::invoice::{Invoice, InvoiceStatus};
use ledgerdesk_entity::notification::NewNotification;
use ledgerdesk_entity::reminder::ReminderRule;

use crate::notifier::{Notifier, ReminderMessage};
use crate::stores::{InvoiceStore, NotificationSink, ReminderLedger, ReminderPolicyStore};

pub fn invoice(number: &str, due_date: NaiveDate) -> Invoice {
    Invoice {
        id: Uuid::new_v4(),
        invoice_number: number.to_string(),
        customer_id: Uuid::new_v4(),
        issue_date: due_date,
        due_date,
        total_amount: Decimal::new(1500_00, 2),
        status: InvoiceStatus::Pending,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn paid_invoice(number: &str, due_date: NaiveDate) -> Invoice {
    Invoice {
        status: InvoiceStatus::Paid,
        ..invoice(number, due_date)
    }
}

pub fn customer(name: &str) -> Customer {
    Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("billing@{}.test", name.to_lowercase()),
        company: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn rule(threshold_days: i32) -> ReminderRule {
    ReminderRule {
        id: Uuid::new_v4(),
        threshold_days,
        enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Invoice store over a fixed row set, filtering like the SQL query does.
pub struct InMemoryInvoices {
    rows: Vec<(Invoice, Customer)>,
}

impl InMemoryInvoices {
    pub fn new(rows: Vec<(Invoice, Customer)>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoices {
    async fn pending_due_before(&self, date: NaiveDate) -> AppResult<Vec<(Invoice, Customer)>> {
        Ok(self
            .rows
            .iter()
            .filter(|(inv, _)| {
                inv.status.is_eligible_for_reminders() && inv.due_date < date
            })
            .cloned()
            .collect())
    }
}

/// Invoice store whose scan always fails.
pub struct FailingInvoices;

#[async_trait]
impl InvoiceStore for FailingInvoices {
    async fn pending_due_before(&self, _date: NaiveDate) -> AppResult<Vec<(Invoice, Customer)>> {
        Err(AppError::database("invoice store unreachable"))
    }
}

/// Policy store over a fixed rule set, filtering and sorting like the SQL
/// query does.
pub struct InMemoryPolicy {
    rules: Vec<ReminderRule>,
}

impl InMemoryPolicy {
    pub fn new(rules: Vec<ReminderRule>) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl ReminderPolicyStore for InMemoryPolicy {
    async fn enabled_rules(&self) -> AppResult<Vec<ReminderRule>> {
        let mut enabled: Vec<ReminderRule> =
            self.rules.iter().filter(|r| r.enabled).cloned().collect();
        enabled.sort_by_key(|r| r.threshold_days);
        Ok(enabled)
    }
}

/// Ledger over a `(invoice, threshold) -> message_sent` map, optionally
/// failing all writes for one invoice.
#[derive(Default)]
pub struct InMemoryLedger {
    records: Mutex<HashMap<(Uuid, i32), bool>>,
    fail_for: Option<Uuid>,
}

impl InMemoryLedger {
    pub fn failing_for(invoice_id: Uuid) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_for: Some(invoice_id),
        }
    }

    pub async fn seed(&self, invoice_id: Uuid, threshold_days: i32, message_sent: bool) {
        self.records
            .lock()
            .await
            .insert((invoice_id, threshold_days), message_sent);
    }

    pub async fn contains(&self, invoice_id: Uuid, threshold_days: i32) -> bool {
        self.records
            .lock()
            .await
            .contains_key(&(invoice_id, threshold_days))
    }

    pub async fn message_sent(&self, invoice_id: Uuid, threshold_days: i32) -> Option<bool> {
        self.records
            .lock()
            .await
            .get(&(invoice_id, threshold_days))
            .copied()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl ReminderLedger for InMemoryLedger {
    async fn exists(&self, invoice_id: Uuid, threshold_days: i32) -> AppResult<bool> {
        Ok(self
            .records
            .lock()
            .await
            .contains_key(&(invoice_id, threshold_days)))
    }

    async fn record(
        &self,
        invoice_id: Uuid,
        threshold_days: i32,
        message_sent: bool,
    ) -> AppResult<bool> {
        if self.fail_for == Some(invoice_id) {
            return Err(AppError::database("ledger write failed"));
        }
        let mut records = self.records.lock().await;
        if records.contains_key(&(invoice_id, threshold_days)) {
            return Ok(false);
        }
        records.insert((invoice_id, threshold_days), message_sent);
        Ok(true)
    }
}

/// Notification sink collecting published notifications, optionally
/// failing every write.
#[derive(Default)]
pub struct InMemorySink {
    notifications: Mutex<Vec<NewNotification>>,
    fail: bool,
}

impl InMemorySink {
    pub fn failing() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn published(&self) -> Vec<NewNotification> {
        self.notifications.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for InMemorySink {
    async fn publish(&self, notification: NewNotification) -> AppResult<()> {
        if self.fail {
            return Err(AppError::database("notification store write failed"));
        }
        self.notifications.lock().await.push(notification);
        Ok(())
    }
}

/// Notifier stub with configurable delivery behavior.
#[derive(Default)]
pub struct StubNotifier {
    behavior: StubBehavior,
    deliveries: AtomicUsize,
}

#[derive(Default, Clone, Copy)]
enum StubBehavior {
    /// Logs-only channel: accepted but not sent.
    #[default]
    NotDelivered,
    /// Real channel: message goes out.
    Delivered,
    /// Channel error.
    Failing,
}

impl StubNotifier {
    pub fn delivering() -> Self {
        Self {
            behavior: StubBehavior::Delivered,
            deliveries: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: StubBehavior::Failing,
            deliveries: AtomicUsize::new(0),
        }
    }

    pub fn deliveries(&self) -> usize {
        self.deliveries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for StubNotifier {
    async fn deliver(&self, _message: &ReminderMessage) -> AppResult<bool> {
        match self.behavior {
            StubBehavior::NotDelivered => Ok(false),
            StubBehavior::Delivered => {
                self.deliveries.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            StubBehavior::Failing => Err(AppError::service_unavailable("smtp unreachable")),
        }
    }
}

/// Notifier that parks mid-delivery until released, to hold a run open.
pub struct BlockingNotifier {
    entered: Arc<Notify>,
    proceed: Arc<Notify>,
}

impl BlockingNotifier {
    pub fn new() -> (Self, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let proceed = Arc::new(Notify::new());
        let notifier = Self {
            entered: Arc::clone(&entered),
            proceed: Arc::clone(&proceed),
        };
        (notifier, entered, proceed)
    }
}

#[async_trait]
impl Notifier for BlockingNotifier {
    async fn deliver(&self, _message: &ReminderMessage) -> AppResult<bool> {
        self.entered.notify_one();
        self.proceed.notified().await;
        Ok(false)
    }
}
