//! Invoice domain entities.

pub mod model;
pub mod status;

pub use model::Invoice;
pub use status::InvoiceStatus;
