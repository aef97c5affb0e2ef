//! Reminder rule repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::reminder::ReminderRule;

/// Repository for administrator-managed reminder rules.
#[derive(Debug, Clone)]
pub struct ReminderRuleRepository {
    pool: PgPool,
}

impl ReminderRuleRepository {
    /// Create a new reminder rule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all rules, enabled or not, ascending by threshold.
    pub async fn find_all(&self) -> AppResult<Vec<ReminderRule>> {
        sqlx::query_as::<_, ReminderRule>(
            "SELECT * FROM reminder_rules ORDER BY threshold_days ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reminder rules", e))
    }

    /// List enabled rules, ascending by threshold.
    pub async fn find_enabled(&self) -> AppResult<Vec<ReminderRule>> {
        sqlx::query_as::<_, ReminderRule>(
            "SELECT * FROM reminder_rules WHERE enabled = TRUE ORDER BY threshold_days ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list enabled reminder rules", e)
        })
    }

    /// Fetch a single rule by id.
    pub async fn find_by_id(&self, rule_id: Uuid) -> AppResult<Option<ReminderRule>> {
        sqlx::query_as::<_, ReminderRule>("SELECT * FROM reminder_rules WHERE id = $1")
            .bind(rule_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch reminder rule", e)
            })
    }

    /// Create a rule. A duplicate threshold maps to a conflict error.
    pub async fn create(&self, threshold_days: i32, enabled: bool) -> AppResult<ReminderRule> {
        sqlx::query_as::<_, ReminderRule>(
            "INSERT INTO reminder_rules (threshold_days, enabled) VALUES ($1, $2) RETURNING *",
        )
        .bind(threshold_days)
        .bind(enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_rule_write_error(e, threshold_days))
    }

    /// Update a rule's threshold and enabled flag.
    pub async fn update(
        &self,
        rule_id: Uuid,
        threshold_days: i32,
        enabled: bool,
    ) -> AppResult<Option<ReminderRule>> {
        sqlx::query_as::<_, ReminderRule>(
            "UPDATE reminder_rules SET threshold_days = $2, enabled = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(rule_id)
        .bind(threshold_days)
        .bind(enabled)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_rule_write_error(e, threshold_days))
    }

    /// Delete a rule. Returns `true` if a row was removed.
    pub async fn delete(&self, rule_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reminder_rules WHERE id = $1")
            .bind(rule_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete reminder rule", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_rule_write_error(e: sqlx::Error, threshold_days: i32) -> AppError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        return AppError::conflict(format!(
            "A reminder rule with threshold {threshold_days} days already exists"
        ));
    }
    AppError::with_source(ErrorKind::Database, "Failed to write reminder rule", e)
}
