//! Team-only route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ordertrack_core::project::model::{Project, ProjectStep};
use ordertrack_core::{workflow, Pagination, TrackError};

use crate::auth::AuthActor;
use crate::error::error_response;
use crate::state::AppState;

/// All projects, regardless of owner.
pub async fn list_projects(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Project>>, (StatusCode, String)> {
    if !actor.is_team() {
        return Err(error_response(TrackError::Forbidden));
    }

    let projects =
        workflow::list_visible_projects(&state.db, &actor, page).map_err(error_response)?;
    Ok(Json(projects))
}

/// Mark a project step as completed.
pub async fn complete_step(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path((id, number)): Path<(String, i64)>,
) -> Result<Json<ProjectStep>, (StatusCode, String)> {
    let step = workflow::advance_step(&state.db, &state.dispatcher, &actor, &id, number)
        .map_err(error_response)?;
    Ok(Json(step))
}
