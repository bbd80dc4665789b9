//! Actor-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Actor row from database.
#[derive(Debug, Clone)]
pub struct ActorRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Create a new actor.
pub fn create_actor(pool: &DbPool, id: &str, name: &str, email: &str, role: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO actors (id, name, email, role) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, email, role],
        )?;
        Ok(())
    })
}

/// Get an actor by ID.
pub fn get_actor(pool: &DbPool, id: &str) -> DbResult<ActorRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, name, email, role, created_at FROM actors WHERE id = ?1",
            params![id],
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
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Actor: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List all actors, oldest first.
pub fn list_actors(pool: &DbPool, offset: i64, limit: i64) -> DbResult<Vec<ActorRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, name, email, role, created_at FROM actors
             ORDER BY created_at ASC, id ASC LIMIT ?1 OFFSET ?2",
        )?;

        let rows = stmt.query_map(params![limit, offset], |row| {
            Ok(ActorRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                role: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::Connection)
    })
}
