//! Reminder ledger entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One dispatched reminder, keyed by `(invoice_id, threshold_days)`.
///
/// The unique constraint on that pair is the at-most-once dispatch
/// guarantee. Rows are inserted while dispatching and never updated or
/// deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReminderRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The invoice this reminder was dispatched for.
    pub invoice_id: Uuid,
    /// The rule threshold that fired.
    pub threshold_days: i32,
    /// Whether the outbound message actually went out. `false` rows are
    /// reconciled later by the delivery worker.
    pub message_sent: bool,
    /// When the reminder was dispatched.
    pub created_at: DateTime<Utc>,
}
