//! Access credential configuration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// Access credential (signed token) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for credential signing (HMAC-SHA256). Process-wide,
    /// immutable after startup.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Access credential TTL in seconds. Deliberately much shorter than
    /// the session idle timeout.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Static identity table for development and tests. Production
    /// deployments wire a real `IdentityVerifier` instead.
    #[serde(default)]
    pub static_users: Vec<StaticUserConfig>,
}

/// One entry of the development identity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticUserConfig {
    /// Login name.
    pub username: String,
    /// Plaintext credential; development only.
    pub password: String,
    /// Role granted on login.
    pub role: Role,
    /// Fixed user id; a random one is assigned when omitted.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            access_ttl_seconds: default_access_ttl(),
            static_users: Vec::new(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    900
}
