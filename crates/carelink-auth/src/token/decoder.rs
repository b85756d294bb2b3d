//! Access credential verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use carelink_core::config::auth::AuthConfig;
use carelink_core::error::AppError;
use carelink_core::result::AppResult;

use super::claims::AccessClaims;

/// Verifies access credentials.
///
/// Verification is a pure function of the token and the signing key: no
/// store lookup happens here. That keeps rejection of forged or expired
/// tokens cheap; the request gate only pays for a store round trip once
/// a credential has already proven authentic.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access credential string.
    ///
    /// Checks signature validity, structural integrity, and expiration.
    pub fn verify(&self, token: &str) -> AppResult<AccessClaims> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Access credential has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid credential format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid credential signature")
                }
                _ => AppError::unauthorized(format!("Credential validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
