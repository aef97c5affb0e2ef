//! # ledgerdesk-entity
//!
//! Domain entity models for LedgerDesk. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod customer;
pub mod invoice;
pub mod notification;
pub mod reminder;
pub mod user;
