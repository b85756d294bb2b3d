//! Auth handlers — login, refresh, logout, me.
//!
//! These are the collaborators around the session authority: they turn a
//! verified identity into a session plus client artifacts (access token
//! in the body, refresh artifact in an HTTP-only cookie) and back.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::traits::verifier::IdentityVerifier;

use crate::cookie;
use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MeResponse, MessageResponse, RefreshResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let identity = state
        .verifier
        .verify(&req.username, &req.password)
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid username or password"))?;

    let issued = state.authority.issue(identity.user_id, identity.role).await?;
    let minted = state
        .encoder
        .mint(identity.user_id, identity.role, &issued.session_id)?;

    let jar = jar.add(cookie::refresh_cookie(
        &issued.session_id,
        &issued.refresh_secret,
        state.config.session.idle_timeout_seconds,
    ));

    Ok((
        jar,
        Json(ApiResponse::ok(LoginResponse {
            access_token: minted.token,
            expires_at: minted.expires_at,
            user_id: identity.user_id.into_uuid(),
            role: identity.role,
        })),
    ))
}

/// POST /api/auth/refresh
///
/// Exchanges the refresh artifact for a fresh access credential and a
/// rotated artifact. When rotation reports the session gone or the
/// secret reused, the artifact is cleared alongside the 401 so the
/// client stops presenting a dead credential.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some((session_id, secret)) = jar
        .get(cookie::REFRESH_COOKIE)
        .and_then(|c| cookie::decode_refresh_cookie(c.value()))
    else {
        return ApiError(AppError::unauthorized("missing or malformed refresh cookie"))
            .into_response();
    };

    match state.authority.rotate_refresh(&session_id, &secret).await {
        Ok(rotated) => {
            let minted = match state.encoder.mint(rotated.user_id, rotated.role, &session_id) {
                Ok(minted) => minted,
                Err(err) => return ApiError(err).into_response(),
            };
            let jar = jar.add(cookie::refresh_cookie(
                &session_id,
                &rotated.refresh_secret,
                state.config.session.idle_timeout_seconds,
            ));
            (
                jar,
                Json(ApiResponse::ok(RefreshResponse {
                    access_token: minted.token,
                    expires_at: minted.expires_at,
                })),
            )
                .into_response()
        }
        Err(err) if matches!(err.kind, ErrorKind::SessionExpired | ErrorKind::RefreshReused) => {
            if err.kind == ErrorKind::RefreshReused {
                warn!(session_id = %session_id, "refresh reuse reported to client");
            }
            let jar = jar.add(cookie::expired_refresh_cookie());
            (jar, ApiError(err)).into_response()
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    if let Some((session_id, _)) = jar
        .get(cookie::REFRESH_COOKIE)
        .and_then(|c| cookie::decode_refresh_cookie(c.value()))
    {
        state.authority.invalidate_by_sid(&session_id).await?;
    }

    let jar = jar.add(cookie::expired_refresh_cookie());
    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "logged out".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<ApiResponse<MeResponse>> {
    Json(ApiResponse::ok(MeResponse {
        user_id: user.user_id.into_uuid(),
        role: user.role,
    }))
}
