//! Invoice entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::InvoiceStatus;

/// An invoice issued to a customer.
///
/// Created and updated by the invoicing CRUD pages; read-only to the
/// reminder engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    /// Unique invoice identifier.
    pub id: Uuid,
    /// Human-facing invoice number (e.g. `"INV-2026-0042"`).
    pub invoice_number: String,
    /// The billed customer.
    pub customer_id: Uuid,
    /// Date the invoice was issued.
    pub issue_date: NaiveDate,
    /// Date payment is due.
    pub due_date: NaiveDate,
    /// Total amount due.
    pub total_amount: Decimal,
    /// Payment status.
    pub status: InvoiceStatus,
    /// When the invoice row was created.
    pub created_at: DateTime<Utc>,
    /// When the invoice row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Whole-day floor difference between `today` and the due date.
    ///
    /// Negative when the due date is still in the future; `0` on the due
    /// date itself. An invoice is overdue only when this is >= 1.
    pub fn days_past_due(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days()
    }

    /// An invoice is overdue when it is still pending and its due date is
    /// strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_eligible_for_reminders() && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(status: InvoiceStatus, due_date: NaiveDate) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            invoice_number: "INV-0001".to_string(),
            customer_id: Uuid::new_v4(),
            issue_date: due_date,
            due_date,
            total_amount: Decimal::new(150_00, 2),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn due_today_is_not_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let inv = invoice(InvoiceStatus::Pending, today);
        assert!(!inv.is_overdue(today));
        assert_eq!(inv.days_past_due(today), 0);
    }

    #[test]
    fn due_yesterday_is_one_day_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let inv = invoice(InvoiceStatus::Pending, today.pred_opt().unwrap());
        assert!(inv.is_overdue(today));
        assert_eq!(inv.days_past_due(today), 1);
    }

    #[test]
    fn paid_invoice_is_never_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let inv = invoice(InvoiceStatus::Paid, due);
        assert!(!inv.is_overdue(today));
    }
}
