//! Access credential creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use carelink_core::config::auth::AuthConfig;
use carelink_core::error::AppError;
use carelink_core::result::AppResult;
use carelink_core::types::{Role, SessionId, UserId};

use super::claims::AccessClaims;

/// A freshly minted access credential.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MintedCredential {
    /// The signed token.
    pub token: String,
    /// When it stops verifying.
    pub expires_at: chrono::DateTime<Utc>,
}

/// Mints signed access credentials (HMAC-SHA256).
///
/// Constructed once at startup from configuration and injected wherever
/// credentials are minted; the key never changes while the process runs.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access credential TTL in seconds.
    access_ttl_seconds: i64,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .finish()
    }
}

impl TokenEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            access_ttl_seconds: config.access_ttl_seconds as i64,
        }
    }

    /// Mints a new access credential for the given user and session.
    pub fn mint(
        &self,
        user_id: UserId,
        role: Role,
        session_id: &SessionId,
    ) -> AppResult<MintedCredential> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(self.access_ttl_seconds);

        let claims = AccessClaims {
            sub: user_id,
            sid: session_id.clone(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access credential: {e}")))?;

        Ok(MintedCredential { token, expires_at })
    }
}
