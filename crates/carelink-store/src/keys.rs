//! Store key builders for all CareLink session-state entries.
//!
//! Centralising key construction prevents typos and makes it easy to
//! find every key the application uses. The Redis provider prepends the
//! configured deployment prefix on top of these.

use carelink_core::types::{HandoffToken, SessionId, UserId};

/// Key for a session record.
pub fn session(session_id: &SessionId) -> String {
    format!("session:{session_id}")
}

/// Key for the pointer from a user to their single current session.
pub fn user_session(user_id: UserId) -> String {
    format!("user_session:{user_id}")
}

/// Key for a one-time login hand-off token.
pub fn handoff(token: &HandoffToken) -> String {
    format!("handoff:{}", token.expose())
}
