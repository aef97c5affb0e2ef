//! Reminder ledger repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;

/// Repository for the reminder dispatch ledger.
///
/// The `(invoice_id, threshold_days)` unique constraint makes the insert
/// an atomic claim, so a racing run can never double-dispatch a pair.
#[derive(Debug, Clone)]
pub struct ReminderRecordRepository {
    pool: PgPool,
}

impl ReminderRecordRepository {
    /// Create a new reminder record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a reminder was already dispatched for this pair.
    pub async fn exists(&self, invoice_id: Uuid, threshold_days: i32) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                 SELECT 1 FROM reminder_records \
                 WHERE invoice_id = $1 AND threshold_days = $2)",
        )
        .bind(invoice_id)
        .bind(threshold_days)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check reminder ledger", e)
        })
    }

    /// Claim the `(invoice, threshold)` pair. Returns `false` if another
    /// run recorded it first.
    pub async fn insert(
        &self,
        invoice_id: Uuid,
        threshold_days: i32,
        message_sent: bool,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO reminder_records (invoice_id, threshold_days, message_sent) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (invoice_id, threshold_days) DO NOTHING",
        )
        .bind(invoice_id)
        .bind(threshold_days)
        .bind(message_sent)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to write reminder ledger", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
