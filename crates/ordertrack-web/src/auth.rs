//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, StatusCode};
use ordertrack_core::{actor::Actor, identity};

use crate::state::AppState;

/// The authenticated actor for a request, resolved from the
/// `Authorization: Bearer <token>` header through the identity seam.
pub struct AuthActor(pub Actor);

impl FromRequestParts<AppState> for AuthActor {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, "Missing bearer token".to_string()))?;

        let actor = identity::current_actor(&state.db, token)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid session token".to_string()))?;

        Ok(AuthActor(actor))
    }
}
