//! Repository implementations, one per table.

pub mod invoice;
pub mod notification;
pub mod reminder_record;
pub mod reminder_rule;

pub use invoice::InvoiceRepository;
pub use notification::NotificationRepository;
pub use reminder_record::ReminderRecordRepository;
pub use reminder_rule::ReminderRuleRepository;
