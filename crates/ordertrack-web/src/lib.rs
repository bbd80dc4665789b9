//! Ordertrack Web Server
//!
//! Axum-based REST API and websocket notification channel.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post},
    Router,
};
use ordertrack_db::DbPool;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(routes::health))
        // Actors
        .route("/actors/me", get(routes::actors::me))
        .route("/actors", get(routes::actors::list_actors))
        // Projects
        .route("/projects", get(routes::projects::list_projects))
        .route("/projects", post(routes::projects::create_project))
        .route("/projects/{id}", get(routes::projects::get_project))
        .route("/projects/{id}/steps", get(routes::projects::get_steps))
        // Team operations
        .route("/team/projects", get(routes::team::list_projects))
        .route(
            "/team/projects/{id}/steps/{number}/complete",
            post(routes::team::complete_step),
        )
        // Notifications
        .route("/notifications", get(routes::notifications::list_notifications))
        .route("/notifications/{id}/read", post(routes::notifications::mark_read))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(db: Arc<DbPool>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(db);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
