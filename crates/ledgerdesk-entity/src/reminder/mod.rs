//! Reminder policy and ledger entities.

pub mod record;
pub mod rule;

pub use record::ReminderRecord;
pub use rule::ReminderRule;
