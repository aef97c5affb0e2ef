//! Administrator handlers.

pub mod reminder_rules;
pub mod reminders;
