//! Reminder rule entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A reminder tier configured by an administrator.
///
/// A rule activates for an invoice once it is at least `threshold_days`
/// past due. Thresholds are unique within the table; the engine reads the
/// enabled set once per run.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReminderRule {
    /// Unique rule identifier.
    pub id: Uuid,
    /// Days overdue at which this tier activates. Non-negative.
    pub threshold_days: i32,
    /// Whether the rule participates in runs.
    pub enabled: bool,
    /// When the rule was created.
    pub created_at: DateTime<Utc>,
    /// When the rule was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ReminderRule {
    /// Whether an invoice `days_overdue` past due satisfies this rule.
    pub fn is_satisfied_by(&self, days_overdue: i64) -> bool {
        days_overdue >= i64::from(self.threshold_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(threshold_days: i32) -> ReminderRule {
        ReminderRule {
            id: Uuid::new_v4(),
            threshold_days,
            enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        assert!(rule(7).is_satisfied_by(7));
        assert!(rule(7).is_satisfied_by(10));
        assert!(!rule(7).is_satisfied_by(6));
    }
}
