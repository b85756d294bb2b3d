//! Opaque credential value types: session identifiers, refresh secrets,
//! and login hand-off tokens.
//!
//! Each wraps a validated random string rather than a bare `String`, so a
//! session identifier can never be passed where a refresh secret is
//! expected. All three carry 256 bits of OS entropy encoded as URL-safe
//! base64 without padding (43 characters).

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Number of random bytes backing each credential value.
const TOKEN_BYTES: usize = 32;

/// Encoded length of a credential value (43 base64url chars, no padding).
const TOKEN_LEN: usize = 43;

/// Generate a fresh URL-safe token from OS entropy.
fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Validate that a string looks like one of our generated tokens.
fn validate_token(s: &str, what: &str) -> Result<(), AppError> {
    if s.len() != TOKEN_LEN
        || !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(AppError::validation(format!("malformed {what}")));
    }
    Ok(())
}

/// Opaque, unguessable identifier for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh session identifier.
    pub fn generate() -> Self {
        Self(random_token())
    }

    /// Parse a client-presented session identifier, rejecting anything
    /// that does not match the generated format.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        validate_token(s, "session identifier")?;
        Ok(Self(s.to_string()))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Long-lived, single-use-per-rotation secret exchanged for a new access
/// credential.
///
/// The secret itself is only ever held by the client; the server stores a
/// SHA-256 digest. There is deliberately no `Display` impl, and `Debug`
/// is redacted, so the value cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshSecret(String);

impl RefreshSecret {
    /// Generate a fresh refresh secret.
    pub fn generate() -> Self {
        Self(random_token())
    }

    /// Parse a client-presented refresh secret.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        validate_token(s, "refresh secret")?;
        Ok(Self(s.to_string()))
    }

    /// Expose the secret for transport back to the client.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// SHA-256 digest of the secret, hex-encoded. This is the only form
    /// the server ever persists.
    pub fn digest(&self) -> String {
        use std::fmt::Write as _;

        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let out = hasher.finalize();
        let mut hex = String::with_capacity(out.len() * 2);
        for byte in out {
            let _ = write!(hex, "{byte:02x}");
        }
        hex
    }
}

impl fmt::Debug for RefreshSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshSecret(..)")
    }
}

/// Short-lived one-time token bridging the two steps of a split login
/// flow (primary factor verified, second factor pending).
#[derive(Clone, PartialEq, Eq)]
pub struct HandoffToken(String);

impl HandoffToken {
    /// Generate a fresh hand-off token.
    pub fn generate() -> Self {
        Self(random_token())
    }

    /// Parse a client-presented hand-off token.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        validate_token(s, "hand-off token")?;
        Ok(Self(s.to_string()))
    }

    /// Expose the token for transport back to the client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HandoffToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandoffToken(..)")
    }
}
