//! Notification feed handlers.
//!
//! The dashboard-side consumers of the notifications the reminder engine
//! (and the rest of the back office) produces.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use ledgerdesk_core::error::AppError;
use ledgerdesk_entity::notification::Notification;

use crate::dto::request::ListNotificationsQuery;
use crate::dto::response::{ApiResponse, UnreadCountResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    query
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let notifications = state
        .notification_repo
        .find_for_user(auth.user_id, auth.role.is_admin(), query.limit)
        .await?;

    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UnreadCountResponse>>, ApiError> {
    let unread = state
        .notification_repo
        .count_unread(auth.user_id, auth.role.is_admin())
        .await?;

    Ok(Json(ApiResponse::ok(UnreadCountResponse { unread })))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let updated = state
        .notification_repo
        .mark_read(notification_id, auth.user_id, Utc::now())
        .await?;

    if !updated {
        return Err(AppError::not_found("Notification not found").into());
    }

    Ok(Json(ApiResponse::ok(serde_json::json!({ "read": true }))))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let updated = state
        .notification_repo
        .mark_all_read(auth.user_id, Utc::now())
        .await?;

    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "updated": updated }),
    )))
}
