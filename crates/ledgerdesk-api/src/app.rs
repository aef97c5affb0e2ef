//! Application builder — wires repositories, engine, scheduler, and HTTP
//! server together.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ledgerdesk_core::config::AppConfig;
use ledgerdesk_core::error::AppError;
use ledgerdesk_database::connection::DatabasePool;
use ledgerdesk_database::repositories::{
    InvoiceRepository, NotificationRepository, ReminderRecordRepository, ReminderRuleRepository,
};
use ledgerdesk_reminder::stores::{
    InvoiceStore, NotificationSink, ReminderLedger, ReminderPolicyStore,
};
use ledgerdesk_reminder::{LogNotifier, Notifier, ReminderEngine};
use ledgerdesk_worker::CronScheduler;

use crate::auth::TokenValidator;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Runs the LedgerDesk server with the given configuration and database
/// pool. Blocks until shutdown.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting LedgerDesk server...");

    let pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────────
    let invoice_repo = Arc::new(InvoiceRepository::new(pool.clone()));
    let rule_repo = Arc::new(ReminderRuleRepository::new(pool.clone()));
    let record_repo = Arc::new(ReminderRecordRepository::new(pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone()));

    // ── Reminder engine ──────────────────────────────────────────
    let reminder_engine = Arc::new(ReminderEngine::new(
        Arc::clone(&invoice_repo) as Arc<dyn InvoiceStore>,
        Arc::clone(&rule_repo) as Arc<dyn ReminderPolicyStore>,
        Arc::clone(&record_repo) as Arc<dyn ReminderLedger>,
        Arc::clone(&notification_repo) as Arc<dyn NotificationSink>,
        Arc::new(LogNotifier) as Arc<dyn Notifier>,
    ));

    // ── Cron scheduler ───────────────────────────────────────────
    let mut scheduler =
        CronScheduler::new(Arc::clone(&reminder_engine), config.reminder.clone()).await?;
    scheduler.register_reminder_run().await?;
    scheduler.start().await?;

    // ── HTTP server ──────────────────────────────────────────────
    let token_validator = Arc::new(TokenValidator::new(&config.auth));

    let state = AppState {
        config: Arc::new(config.clone()),
        db,
        token_validator,
        reminder_engine,
        reminder_rule_repo: rule_repo,
        notification_repo,
    };

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("LedgerDesk server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    scheduler.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
