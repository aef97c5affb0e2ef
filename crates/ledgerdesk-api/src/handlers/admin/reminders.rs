//! Manual reminder run trigger.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::info;

use ledgerdesk_reminder::RunSummary;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/admin/reminders/run
///
/// Runs the full scan-and-dispatch cycle immediately and returns the run
/// summary. Partial success (pair-level failures) still yields 200; a run
/// already in progress yields 409; only a total scan failure is a 5xx.
pub async fn run_now(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<RunSummary>, ApiError> {
    require_admin(&auth)?;

    info!(admin = %auth.username, "Manual reminder run triggered");
    let summary = state.reminder_engine.run(Utc::now().date_naive()).await?;

    Ok(Json(summary))
}
