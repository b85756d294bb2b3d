//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle timeout in seconds. Applied as the TTL on session state and
    /// renewed on every authenticated request; a session that stays
    /// quiet this long simply vanishes from the store.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// What happens when a user logs in while already holding a live
    /// session.
    #[serde(default)]
    pub concurrency_policy: ConcurrencyPolicy,
    /// TTL in seconds for one-time login hand-off tokens.
    #[serde(default = "default_handoff_ttl")]
    pub handoff_ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout(),
            concurrency_policy: ConcurrencyPolicy::default(),
            handoff_ttl_seconds: default_handoff_ttl(),
        }
    }
}

/// Policy applied when a login finds an existing live session for the
/// same user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyPolicy {
    /// Reject the new login; the existing session stays live.
    BlockNew,
    /// Invalidate the existing session and let the new login proceed.
    #[default]
    KickOld,
}

impl std::fmt::Display for ConcurrencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConcurrencyPolicy::BlockNew => write!(f, "block_new"),
            ConcurrencyPolicy::KickOld => write!(f, "kick_old"),
        }
    }
}

fn default_idle_timeout() -> u64 {
    1800
}

fn default_handoff_ttl() -> u64 {
    60
}
