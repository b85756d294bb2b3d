//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carelink_core::types::Role;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Short-lived access credential.
    pub access_token: String,
    /// Access credential expiration.
    pub expires_at: DateTime<Utc>,
    /// Authenticated user.
    pub user_id: Uuid,
    /// User role.
    pub role: Role,
}

/// Refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Fresh access credential.
    pub access_token: String,
    /// Access credential expiration.
    pub expires_at: DateTime<Utc>,
}

/// Authenticated identity echo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// Authenticated user.
    pub user_id: Uuid,
    /// User role.
    pub role: Role,
}

/// Admin view of a user's current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSessionResponse {
    /// Whether the user holds a live session.
    pub active: bool,
    /// The live session's identifier, if any.
    pub session_id: Option<String>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the session store answered.
    pub store: bool,
}
