//! Primary-credential verification port.
//!
//! Password, passkey, and SMS-code checking live outside the session
//! core; whatever performs them hands a verified identity to the session
//! authority through this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{Role, UserId};

/// An identity whose primary credential has been verified out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// The authenticated user.
    pub user_id: UserId,
    /// The user's platform role.
    pub role: Role,
}

/// Verifies a user's primary credential (password or equivalent).
///
/// Returns `Ok(None)` when the credential does not match; callers map
/// that to a generic authentication failure. Only infrastructure
/// problems are errors.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Verify the given username/credential pair.
    async fn verify(&self, username: &str, password: &str) -> AppResult<Option<VerifiedIdentity>>;
}
