//! Notification-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Notification row from database.
#[derive(Debug, Clone)]
pub struct NotificationRow {
    pub id: String,
    pub actor_id: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

fn notification_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NotificationRow> {
    Ok(NotificationRow {
        id: row.get(0)?,
        actor_id: row.get(1)?,
        message: row.get(2)?,
        read: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Create an unread notification.
pub fn create_notification(pool: &DbPool, id: &str, actor_id: &str, message: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO notifications (id, actor_id, message) VALUES (?1, ?2, ?3)",
            params![id, actor_id, message],
        )?;
        Ok(())
    })
}

/// Get a notification by ID.
pub fn get_notification(pool: &DbPool, id: &str) -> DbResult<NotificationRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, actor_id, message, read, created_at FROM notifications WHERE id = ?1",
            params![id],
            notification_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DbError::NotFound(format!("Notification: {}", id))
            }
            e => DbError::Connection(e),
        })
    })
}

/// List notifications for an actor, newest first. `created_at` only
/// has second granularity, so the rowid breaks ties in insertion
/// order for rows created within the same second.
pub fn list_notifications(
    pool: &DbPool,
    actor_id: &str,
    offset: i64,
    limit: i64,
) -> DbResult<Vec<NotificationRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, actor_id, message, read, created_at FROM notifications
             WHERE actor_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2 OFFSET ?3",
        )?;

        let rows = stmt.query_map(params![actor_id, limit, offset], notification_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::Connection)
    })
}

/// Mark a notification as read. The actor filter makes acknowledging
/// someone else's notification indistinguishable from a missing one.
pub fn mark_read(pool: &DbPool, actor_id: &str, notification_id: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1 AND actor_id = ?2",
            params![notification_id, actor_id],
        )?;

        if changed == 0 {
            return Err(DbError::NotFound(format!(
                "Notification: {}",
                notification_id
            )));
        }
        Ok(())
    })
}
