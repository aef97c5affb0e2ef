//! Route definitions for the LedgerDesk HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Notification feed endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            post(handlers::notification::mark_all_read),
        )
}

/// Admin endpoints: manual reminder run, reminder rule CRUD
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/reminders/run",
            post(handlers::admin::reminders::run_now),
        )
        .route(
            "/admin/reminders/rules",
            get(handlers::admin::reminder_rules::list_rules)
                .post(handlers::admin::reminder_rules::create_rule),
        )
        .route(
            "/admin/reminders/rules/{id}",
            put(handlers::admin::reminder_rules::update_rule)
                .delete(handlers::admin::reminder_rules::delete_rule),
        )
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
