//! Request DTOs.

use serde::Deserialize;
use validator::Validate;

/// Create or update a reminder rule.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveReminderRuleRequest {
    /// Days overdue at which the tier activates.
    #[validate(range(min = 0, message = "threshold_days must be non-negative"))]
    pub threshold_days: i32,
    /// Whether the rule participates in runs.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListNotificationsQuery {
    /// Maximum number of notifications to return.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 200))]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}
