//! Actor route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use ordertrack_core::actor::Actor;
use ordertrack_core::{identity, Pagination, TrackError};

use crate::auth::AuthActor;
use crate::error::error_response;
use crate::state::AppState;

/// The authenticated actor itself.
pub async fn me(AuthActor(actor): AuthActor) -> Json<Actor> {
    Json(actor)
}

/// All registered actors. Team-only.
pub async fn list_actors(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Actor>>, (StatusCode, String)> {
    if !actor.is_team() {
        return Err(error_response(TrackError::Forbidden));
    }

    let actors = identity::list_actors(&state.db, page).map_err(error_response)?;
    Ok(Json(actors))
}
