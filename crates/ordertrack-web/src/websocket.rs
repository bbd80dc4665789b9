//! WebSocket handler for the per-actor notification channel.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use ordertrack_core::identity;
use serde::Deserialize;
use tracing::{debug, info};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct WsParams {
    /// Session token. Browser websocket clients cannot set headers, so
    /// the bearer token travels as a query parameter here.
    token: String,
}

/// WebSocket upgrade handler. Rejects unknown tokens before upgrading.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
) -> impl IntoResponse {
    let actor = match identity::current_actor(&state.db, &params.token) {
        Ok(actor) => actor,
        Err(_) => {
            return (StatusCode::UNAUTHORIZED, "Invalid session token").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, actor.id))
        .into_response()
}

/// Handle one notification channel connection.
async fn handle_socket(socket: WebSocket, state: AppState, actor_id: String) {
    let subscription = match state.dispatcher.subscribe(&state.db, &actor_id) {
        Ok(subscription) => subscription,
        Err(e) => {
            debug!(actor_id = %actor_id, error = %e, "subscription rejected");
            return;
        }
    };
    let sub_id = subscription.id;
    let mut rx = subscription.receiver;

    let (mut sender, mut receiver) = socket.split();
    info!(actor_id = %actor_id, "notification channel connected");

    // Forward pushed notifications to this client. `None` from the
    // receiver means a newer subscription replaced this one.
    let send_task = tokio::spawn(async move {
        while let Some(push) = rx.recv().await {
            let json = match serde_json::to_string(&push) {
                Ok(json) => json,
                Err(_) => continue,
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket send failed, client disconnected");
                break;
            }
        }
    });

    // Drain client frames; the channel is push-only.
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                debug!("WebSocket client sent close frame");
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    state.dispatcher.unsubscribe(&actor_id, sub_id);
    info!(actor_id = %actor_id, "notification channel disconnected");
}
