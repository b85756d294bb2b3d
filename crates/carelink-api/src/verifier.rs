//! Static identity verifier for development and tests.
//!
//! Real deployments implement [`IdentityVerifier`] against their
//! credential service (password hashes, passkeys, SMS codes); this one
//! just answers from a fixed table loaded at startup.

use std::collections::HashMap;

use async_trait::async_trait;

use carelink_core::config::auth::StaticUserConfig;
use carelink_core::result::AppResult;
use carelink_core::traits::verifier::{IdentityVerifier, VerifiedIdentity};
use carelink_core::types::UserId;

struct StaticUser {
    password: String,
    identity: VerifiedIdentity,
}

/// Identity verifier backed by the `auth.static_users` config table.
pub struct StaticIdentityVerifier {
    users: HashMap<String, StaticUser>,
}

impl StaticIdentityVerifier {
    /// Build the verifier from configuration entries. Entries without a
    /// fixed user id get a random one for the process lifetime.
    pub fn from_config(entries: &[StaticUserConfig]) -> Self {
        let users = entries
            .iter()
            .map(|entry| {
                let user_id = entry.user_id.map(UserId::from_uuid).unwrap_or_default();
                (
                    entry.username.clone(),
                    StaticUser {
                        password: entry.password.clone(),
                        identity: VerifiedIdentity {
                            user_id,
                            role: entry.role,
                        },
                    },
                )
            })
            .collect();
        Self { users }
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, username: &str, password: &str) -> AppResult<Option<VerifiedIdentity>> {
        Ok(self
            .users
            .get(username)
            .filter(|user| user.password == password)
            .map(|user| user.identity))
    }
}
