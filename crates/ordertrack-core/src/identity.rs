//! Identity seam.
//!
//! Stands in for the external identity provider: actors are registered
//! by an operator and sessions are opaque tokens mapped back to
//! actors. Credential mechanics (password verification, token expiry)
//! live outside this crate.

use crate::actor::{Actor, Role};
use crate::error::{TrackError, TrackResult};
use crate::Pagination;
use ordertrack_db::queries::{actors, sessions};
use ordertrack_db::{DbError, DbPool};
use uuid::Uuid;

/// Register a new actor.
pub fn register_actor(pool: &DbPool, name: &str, email: &str, role: Role) -> TrackResult<Actor> {
    let id = Uuid::new_v4().to_string();
    actors::create_actor(pool, &id, name, email, role.as_str())?;
    get_actor(pool, &id)
}

/// Look up an actor by ID.
pub fn get_actor(pool: &DbPool, id: &str) -> TrackResult<Actor> {
    match actors::get_actor(pool, id) {
        Ok(row) => Ok(Actor::from_row(row)),
        Err(DbError::NotFound(_)) => Err(TrackError::ActorNotFound(id.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// All registered actors, oldest first. Team-only data; the caller is
/// responsible for gating access.
pub fn list_actors(pool: &DbPool, page: Pagination) -> TrackResult<Vec<Actor>> {
    let rows = actors::list_actors(pool, page.offset(), page.limit())?;
    Ok(rows.into_iter().map(Actor::from_row).collect())
}

/// Open a session for an actor and return the opaque bearer token.
pub fn open_session(pool: &DbPool, actor_id: &str) -> TrackResult<String> {
    let actor = get_actor(pool, actor_id)?;
    let token = Uuid::new_v4().to_string();
    sessions::create_session(pool, &token, &actor.id)?;
    Ok(token)
}

/// Resolve the actor behind a bearer token.
pub fn current_actor(pool: &DbPool, token: &str) -> TrackResult<Actor> {
    match sessions::get_session_actor(pool, token) {
        Ok(row) => Ok(Actor::from_row(row)),
        Err(DbError::NotFound(_)) => Err(TrackError::Unauthenticated),
        Err(e) => Err(e.into()),
    }
}
