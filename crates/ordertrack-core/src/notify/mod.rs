//! Notification dispatch.
//!
//! Step completions are persisted as notification rows (the durable
//! record of truth) and pushed best-effort over a live per-actor
//! channel when one is registered. An actor that was offline at
//! delivery time retrieves the row later via `list_notifications`.

use crate::error::{TrackError, TrackResult};
use crate::identity;
use crate::Pagination;
use ordertrack_db::queries::notifications as queries;
use ordertrack_db::{DbError, DbPool};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// A persisted notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub actor_id: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

impl Notification {
    /// Create a Notification from a database row.
    pub fn from_row(row: queries::NotificationRow) -> Self {
        Self {
            id: row.id,
            actor_id: row.actor_id,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

/// Payload pushed over a live channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Push {
    pub notification_id: String,
    pub message: String,
}

/// Handle for one live subscription.
#[derive(Debug)]
pub struct Subscription {
    /// Identifies this subscription when unsubscribing, so a stale
    /// disconnect cannot evict a newer session for the same actor.
    pub id: u64,
    pub receiver: mpsc::UnboundedReceiver<Push>,
}

type ChannelMap = HashMap<String, (u64, mpsc::UnboundedSender<Push>)>;

/// Routes completion events to possibly-connected actors.
///
/// At most one live channel per actor: a new subscription replaces the
/// old one. The registry is local to this process; multi-instance
/// fan-out would need an external broker behind the same interface.
#[derive(Default)]
pub struct Dispatcher {
    channels: Mutex<ChannelMap>,
    next_id: AtomicU64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn channels(&self) -> MutexGuard<'_, ChannelMap> {
        // The map holds no invariants across operations, so a poisoned
        // lock is still usable.
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register the live channel for `actor_id`, replacing any prior
    /// one. Fails if the actor is unknown.
    pub fn subscribe(&self, pool: &DbPool, actor_id: &str) -> TrackResult<Subscription> {
        identity::get_actor(pool, actor_id)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.channels().insert(actor_id.to_string(), (id, tx));

        debug!(actor_id, subscription = id, "notification channel registered");
        Ok(Subscription { id, receiver: rx })
    }

    /// Drop subscription `sub_id` for `actor_id`. Idempotent, and a
    /// no-op when a newer subscription has already replaced this one.
    pub fn unsubscribe(&self, actor_id: &str, sub_id: u64) {
        let mut channels = self.channels();
        if channels.get(actor_id).is_some_and(|(id, _)| *id == sub_id) {
            channels.remove(actor_id);
            debug!(actor_id, subscription = sub_id, "notification channel removed");
        }
    }

    /// Persist a notification for `actor_id` and push it over the live
    /// channel if one is registered. The push is best-effort; the row
    /// is what the actor can rely on.
    pub fn deliver(&self, pool: &DbPool, actor_id: &str, message: &str) -> TrackResult<Notification> {
        let id = Uuid::new_v4().to_string();
        queries::create_notification(pool, &id, actor_id, message)?;
        let row = queries::get_notification(pool, &id)?;
        let notification = Notification::from_row(row);

        if let Some((_, tx)) = self.channels().get(actor_id) {
            let push = Push {
                notification_id: notification.id.clone(),
                message: notification.message.clone(),
            };
            if tx.send(push).is_err() {
                debug!(actor_id, "live channel closed, notification persisted only");
            }
        }

        Ok(notification)
    }
}

/// Notifications for `actor_id`, newest first.
pub fn list_notifications(
    pool: &DbPool,
    actor_id: &str,
    page: Pagination,
) -> TrackResult<Vec<Notification>> {
    let rows = queries::list_notifications(pool, actor_id, page.offset(), page.limit())?;
    Ok(rows.into_iter().map(Notification::from_row).collect())
}

/// Acknowledge a notification. NotFound unless it belongs to
/// `actor_id`.
pub fn mark_read(pool: &DbPool, actor_id: &str, notification_id: &str) -> TrackResult<()> {
    match queries::mark_read(pool, actor_id, notification_id) {
        Ok(()) => Ok(()),
        Err(DbError::NotFound(_)) => {
            Err(TrackError::NotificationNotFound(notification_id.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
