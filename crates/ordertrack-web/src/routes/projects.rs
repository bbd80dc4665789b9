//! Project route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ordertrack_core::project::model::{NewProject, Project, ProjectStep};
use ordertrack_core::{workflow, Pagination};

use crate::auth::AuthActor;
use crate::error::error_response;
use crate::state::AppState;

pub async fn list_projects(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Project>>, (StatusCode, String)> {
    let projects =
        workflow::list_visible_projects(&state.db, &actor, page).map_err(error_response)?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Json(req): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), (StatusCode, String)> {
    let project = workflow::create_project(&state.db, &actor, &req).map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
) -> Result<Json<Project>, (StatusCode, String)> {
    let project = workflow::get_project(&state.db, &actor, &id).map_err(error_response)?;
    Ok(Json(project))
}

pub async fn get_steps(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
) -> Result<Json<Vec<ProjectStep>>, (StatusCode, String)> {
    let steps = workflow::get_steps(&state.db, &actor, &id).map_err(error_response)?;
    Ok(Json(steps))
}
