//! Route handlers.

pub mod actors;
pub mod notifications;
pub mod projects;
pub mod team;

use axum::Json;

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
