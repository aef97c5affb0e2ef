//! Health check handler.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let database_ok = state.db.health_check().await.unwrap_or(false);

    Ok(Json(serde_json::json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "database": database_ok,
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
