//! Invoice status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment status of an invoice.
///
/// The reminder engine never writes this field. Overdue-ness is derived
/// from `(status == Pending, due_date, today)` so that the date comparison
/// stays the single source of truth; the stored `Overdue` variant exists
/// for dashboards that persist the transition separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Issued, awaiting payment.
    Pending,
    /// Paid in full.
    Paid,
    /// Marked overdue by the dashboard.
    Overdue,
}

impl InvoiceStatus {
    /// Only pending invoices are eligible for overdue evaluation.
    pub fn is_eligible_for_reminders(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ledgerdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ledgerdesk_core::AppError::validation(format!(
                "Invalid invoice status: '{s}'. Expected one of: pending, paid, overdue"
            ))),
        }
    }
}
