//! Overdue-invoice reminder engine configuration.

use serde::{Deserialize, Serialize};

/// Reminder engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Whether the scheduled daily run is enabled. The manual trigger
    /// endpoint works regardless.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the daily run (seconds-resolution, UTC).
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            schedule: default_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Daily at 09:00.
fn default_schedule() -> String {
    "0 0 9 * * *".to_string()
}
