//! The session gate: per-request credential verification and liveness
//! check.
//!
//! Runs on every request. A missing or failing credential never aborts
//! the request here: it simply proceeds unauthenticated, and downstream
//! authorization (the `CurrentUser` extractor) rejects it if
//! authentication was required. The one exception is a store outage,
//! which is an infrastructure failure for this request, not an
//! authentication outcome.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use carelink_core::result::AppResult;

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// Gate middleware applied to the whole API.
///
/// Ordering matters: the credential is verified before the store is
/// consulted, so a forged or expired token is rejected without a round
/// trip. On success the identity is attached to request extensions and
/// the session's idle life is renewed.
pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = bearer_token(request.headers()) {
        if let Some(user) = authenticate(&state, &token).await? {
            request.extensions_mut().insert(user);
        }
    }
    Ok(next.run(request).await)
}

/// Pull the bearer token out of the authorization header, if any.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(String::from)
}

/// Resolve a presented credential to an authenticated identity.
///
/// Returns `Ok(None)` for every authentication failure (bad signature,
/// expired credential, stale session) after logging it; returns `Err`
/// only when the store itself failed, which must not be mistaken for
/// "session not found".
async fn authenticate(state: &AppState, token: &str) -> AppResult<Option<CurrentUser>> {
    let claims = match state.decoder.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            debug!(reason = %err.message, "access credential rejected");
            return Ok(None);
        }
    };

    let user_id = claims.user_id();
    let session_id = claims.session_id().clone();

    if !state.authority.is_active(&session_id, user_id).await? {
        debug!(
            user_id = %user_id,
            session_id = %session_id,
            "credential verified but session is not the user's current one"
        );
        return Ok(None);
    }

    state.authority.touch(&session_id).await?;

    Ok(Some(CurrentUser {
        user_id,
        role: claims.role,
        session_id,
    }))
}
