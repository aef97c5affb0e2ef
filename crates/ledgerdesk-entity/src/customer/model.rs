//! Customer entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer record, paired with each overdue invoice when scanning.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    /// Unique customer identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Billing contact e-mail.
    pub email: String,
    /// Company name, if the customer is a business.
    pub company: Option<String>,
    /// When the customer row was created.
    pub created_at: DateTime<Utc>,
    /// When the customer row was last updated.
    pub updated_at: DateTime<Utc>,
}
