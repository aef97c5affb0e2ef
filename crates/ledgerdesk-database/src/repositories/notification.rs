//! Notification repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::notification::{NewNotification, Notification};

/// Repository for dashboard notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a notification.
    pub async fn create(&self, new: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, title, message, kind, related_invoice_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.message)
        .bind(&new.kind)
        .bind(new.related_invoice_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// List notifications visible to a user, newest first. Admins also see
    /// broadcast rows (`user_id IS NULL`).
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        include_broadcasts: bool,
        limit: i64,
    ) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE user_id = $1 OR (user_id IS NULL AND $2) \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(user_id)
        .bind(include_broadcasts)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    /// Count unread notifications visible to a user.
    pub async fn count_unread(&self, user_id: Uuid, include_broadcasts: bool) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications \
             WHERE (user_id = $1 OR (user_id IS NULL AND $2)) AND is_read = FALSE",
        )
        .bind(user_id)
        .bind(include_broadcasts)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark one notification as read. Returns `false` if no visible row
    /// matched.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $3 \
             WHERE id = $1 AND (user_id = $2 OR user_id IS NULL)",
        )
        .bind(notification_id)
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all notifications visible to a user as read. Returns the number
    /// of rows updated.
    pub async fn mark_all_read(&self, user_id: Uuid, read_at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 \
             WHERE (user_id = $1 OR user_id IS NULL) AND is_read = FALSE",
        )
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }
}
