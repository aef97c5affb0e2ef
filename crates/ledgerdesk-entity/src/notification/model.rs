//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A notification visible in the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user, or `None` for a broadcast to all admins.
    pub user_id: Option<Uuid>,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification kind (e.g. `"invoice_overdue"`).
    pub kind: String,
    /// The invoice this notification refers to, if any.
    pub related_invoice_id: Option<Uuid>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user, or `None` for a broadcast to all admins.
    pub user_id: Option<Uuid>,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification kind.
    pub kind: String,
    /// The invoice this notification refers to, if any.
    pub related_invoice_id: Option<Uuid>,
}

impl NewNotification {
    /// A broadcast notification addressed to all admins.
    pub fn admin_broadcast(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            user_id: None,
            title: title.into(),
            message: message.into(),
            kind: kind.into(),
            related_invoice_id: None,
        }
    }

    /// Attach a related invoice reference.
    pub fn with_invoice(mut self, invoice_id: Uuid) -> Self {
        self.related_invoice_id = Some(invoice_id);
        self
    }
}
