//! Reminder rule administration.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use ledgerdesk_core::error::AppError;
use ledgerdesk_entity::reminder::ReminderRule;

use crate::dto::request::SaveReminderRuleRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/reminders/rules
pub async fn list_rules(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ReminderRule>>>, ApiError> {
    require_admin(&auth)?;

    let rules = state.reminder_rule_repo.find_all().await?;
    Ok(Json(ApiResponse::ok(rules)))
}

/// POST /api/admin/reminders/rules
pub async fn create_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<SaveReminderRuleRequest>,
) -> Result<Json<ApiResponse<ReminderRule>>, ApiError> {
    require_admin(&auth)?;
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let rule = state
        .reminder_rule_repo
        .create(request.threshold_days, request.enabled)
        .await?;

    Ok(Json(ApiResponse::ok(rule)))
}

/// PUT /api/admin/reminders/rules/{id}
pub async fn update_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(rule_id): Path<Uuid>,
    Json(request): Json<SaveReminderRuleRequest>,
) -> Result<Json<ApiResponse<ReminderRule>>, ApiError> {
    require_admin(&auth)?;
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let rule = state
        .reminder_rule_repo
        .update(rule_id, request.threshold_days, request.enabled)
        .await?
        .ok_or_else(|| AppError::not_found("Reminder rule not found"))?;

    Ok(Json(ApiResponse::ok(rule)))
}

/// DELETE /api/admin/reminders/rules/{id}
pub async fn delete_rule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(rule_id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    require_admin(&auth)?;

    let deleted = state.reminder_rule_repo.delete(rule_id).await?;
    if !deleted {
        return Err(AppError::not_found("Reminder rule not found").into());
    }

    Ok(Json(ApiResponse::ok(serde_json::json!({ "deleted": true }))))
}
