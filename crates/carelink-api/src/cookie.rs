//! The client-held refresh artifact: `sessionId.refreshSecret` in an
//! HTTP-only cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};

use carelink_core::types::{RefreshSecret, SessionId};

/// Name of the refresh artifact cookie.
pub const REFRESH_COOKIE: &str = "carelink_refresh";

/// Build the refresh cookie for a freshly issued or rotated session.
///
/// `Max-Age` tracks the session's idle timeout so the browser forgets
/// the artifact around the same time the store does.
pub fn refresh_cookie(
    session_id: &SessionId,
    secret: &RefreshSecret,
    max_age_seconds: u64,
) -> Cookie<'static> {
    Cookie::build((
        REFRESH_COOKIE,
        format!("{}.{}", session_id.as_str(), secret.expose()),
    ))
    .path("/api/auth")
    .http_only(true)
    .secure(true)
    .same_site(SameSite::Strict)
    .max_age(time::Duration::seconds(max_age_seconds as i64))
    .build()
}

/// Build an immediately-expiring cookie that makes the client discard
/// the artifact.
pub fn expired_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, ""))
        .path("/api/auth")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Decode a presented artifact back into its parts. Returns `None` for
/// anything that does not parse as `sessionId.refreshSecret`.
pub fn decode_refresh_cookie(value: &str) -> Option<(SessionId, RefreshSecret)> {
    let (sid, secret) = value.split_once('.')?;
    let session_id = SessionId::parse(sid).ok()?;
    let refresh_secret = RefreshSecret::parse(secret).ok()?;
    Some((session_id, refresh_secret))
}
