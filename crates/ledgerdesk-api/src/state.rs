//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use ledgerdesk_core::config::AppConfig;
use ledgerdesk_database::connection::DatabasePool;
use ledgerdesk_database::repositories::{NotificationRepository, ReminderRuleRepository};
use ledgerdesk_reminder::ReminderEngine;

use crate::auth::TokenValidator;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Bearer token validator
    pub token_validator: Arc<TokenValidator>,
    /// The overdue-invoice reminder engine
    pub reminder_engine: Arc<ReminderEngine>,
    /// Reminder rule repository (policy CRUD)
    pub reminder_rule_repo: Arc<ReminderRuleRepository>,
    /// Notification repository (dashboard feed)
    pub notification_repo: Arc<NotificationRepository>,
}
