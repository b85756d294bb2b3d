//! Store-resident session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carelink_core::types::{RefreshSecret, Role, UserId};

/// The session record persisted in the shared store, keyed by session id.
///
/// Identity fields are immutable for the session's lifetime; the refresh
/// secret digest is overwritten exactly once per successful rotation.
/// The record's store TTL, not any field here, is what ends an idle
/// session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Owning user.
    pub user_id: UserId,
    /// Role bound at issuance.
    pub role: Role,
    /// SHA-256 digest of the current refresh secret. The secret itself
    /// is never stored.
    pub refresh_secret_hash: String,
    /// When the session was issued.
    pub issued_at: DateTime<Utc>,
    /// Last successful validation or rotation.
    pub last_seen_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a fresh record for a newly issued session.
    pub fn new(user_id: UserId, role: Role, refresh_secret: &RefreshSecret) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            role,
            refresh_secret_hash: refresh_secret.digest(),
            issued_at: now,
            last_seen_at: now,
        }
    }
}
