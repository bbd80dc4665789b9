//! Session-related database queries.
//!
//! Sessions are opaque bearer tokens mapped back to actors. Issuance
//! and expiry policy belong to the identity layer, not here.

use crate::pool::{DbError, DbPool, DbResult};
use crate::queries::actors::ActorRow;
use rusqlite::params;

/// Create a new session token for an actor.
pub fn create_session(pool: &DbPool, token: &str, actor_id: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO sessions (token, actor_id) VALUES (?1, ?2)",
            params![token, actor_id],
        )?;
        Ok(())
    })
}

/// Resolve the actor behind a session token.
pub fn get_session_actor(pool: &DbPool, token: &str) -> DbResult<ActorRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT a.id, a.name, a.email, a.role, a.created_at
             FROM sessions s JOIN actors a ON a.id = s.actor_id
             WHERE s.token = ?1",
            params![token],
            |row| {
                Ok(ActorRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    role: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound("Session".to_string()),
            e => DbError::Connection(e),
        })
    })
}
