//! Application state.

use ordertrack_core::notify::Dispatcher;
use ordertrack_db::DbPool;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            db,
            dispatcher: Arc::new(Dispatcher::new()),
        }
    }
}
