//! Notification route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ordertrack_core::notify::{self, Notification};
use ordertrack_core::Pagination;

use crate::auth::AuthActor;
use crate::error::error_response;
use crate::state::AppState;

/// Notifications for the authenticated actor, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Notification>>, (StatusCode, String)> {
    let notifications =
        notify::list_notifications(&state.db, &actor.id, page).map_err(error_response)?;
    Ok(Json(notifications))
}

/// Acknowledge one notification.
pub async fn mark_read(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    notify::mark_read(&state.db, &actor.id, &id).map_err(error_response)?;
    Ok(Json(serde_json::json!({ "success": true })))
}
