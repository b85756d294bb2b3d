//! `CurrentUser` extractor — the authenticated identity the session gate
//! attached to the request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use carelink_core::error::AppError;
use carelink_core::result::AppResult;
use carelink_core::types::{Role, SessionId, UserId};

use crate::error::ApiError;

/// Authenticated identity for the remainder of a request.
///
/// Inserted into request extensions by the session gate when a presented
/// access credential verifies and its session is live. Handlers that
/// require authentication take this as an extractor; its absence is the
/// authorization failure (401), not the gate's.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Authenticated user.
    pub user_id: UserId,
    /// Role bound to the session.
    pub role: Role,
    /// The live session backing this request.
    pub session_id: SessionId,
}

impl CurrentUser {
    /// Reject non-admin callers of administrative endpoints.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("administrator role required"))
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError(AppError::unauthorized("authentication required")))
    }
}
