//! Invoice repository implementation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::customer::Customer;
use ledgerdesk_entity::invoice::{Invoice, InvoiceStatus};

/// Flat join row for the overdue scan (invoice columns plus its customer).
#[derive(Debug, FromRow)]
struct PendingInvoiceRow {
    id: Uuid,
    invoice_number: String,
    customer_id: Uuid,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    total_amount: Decimal,
    status: InvoiceStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_name: String,
    customer_email: String,
    customer_company: Option<String>,
    customer_created_at: DateTime<Utc>,
    customer_updated_at: DateTime<Utc>,
}

impl PendingInvoiceRow {
    fn split(self) -> (Invoice, Customer) {
        let customer = Customer {
            id: self.customer_id,
            name: self.customer_name,
            email: self.customer_email,
            company: self.customer_company,
            created_at: self.customer_created_at,
            updated_at: self.customer_updated_at,
        };
        let invoice = Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            customer_id: self.customer_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            total_amount: self.total_amount,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (invoice, customer)
    }
}

/// Repository for invoice queries.
///
/// The reminder engine only reads invoices; writes happen in the
/// invoicing CRUD pages, which sit outside this service.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    /// Create a new invoice repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every pending invoice whose due date is strictly before
    /// `date`, each paired with its customer. Unordered.
    pub async fn find_pending_due_before(
        &self,
        date: NaiveDate,
    ) -> AppResult<Vec<(Invoice, Customer)>> {
        let rows = sqlx::query_as::<_, PendingInvoiceRow>(
            "SELECT i.id, i.invoice_number, i.customer_id, i.issue_date, i.due_date, \
                    i.total_amount, i.status, i.created_at, i.updated_at, \
                    c.name AS customer_name, c.email AS customer_email, \
                    c.company AS customer_company, \
                    c.created_at AS customer_created_at, c.updated_at AS customer_updated_at \
             FROM invoices i \
             JOIN customers c ON c.id = i.customer_id \
             WHERE i.status = $1 AND i.due_date < $2",
        )
        .bind(InvoiceStatus::Pending)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending invoices", e)
        })?;

        Ok(rows.into_iter().map(PendingInvoiceRow::split).collect())
    }

    /// Fetch a single invoice by id.
    pub async fn find_by_id(&self, invoice_id: Uuid) -> AppResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(invoice_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch invoice", e))
    }
}
