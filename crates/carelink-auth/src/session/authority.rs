//! The session authority: issuance, renewal, rotation, and revocation.
//!
//! All session state lives in the shared store; the authority itself is
//! stateless and safe to call from any number of request tasks. The
//! pointer key (`user_session:{user_id}`) is the single-active-session
//! mechanism: it always names the one session the platform recognizes
//! for a user, and the store's per-key atomicity makes it the
//! serialization point across process instances. No in-process locking,
//! no in-process caching.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use carelink_core::config::session::{ConcurrencyPolicy, SessionConfig};
use carelink_core::error::AppError;
use carelink_core::result::AppResult;
use carelink_core::traits::store::SessionStore;
use carelink_core::traits::verifier::VerifiedIdentity;
use carelink_core::types::{HandoffToken, RefreshSecret, Role, SessionId, UserId};

use carelink_store::keys;
use carelink_store::provider::StoreManager;

use super::record::SessionRecord;

/// Result of a successful session issuance.
///
/// The refresh secret appears here exactly once; after the caller encodes
/// it into the client artifact it exists nowhere on the server but as a
/// digest.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// The new session's identifier.
    pub session_id: SessionId,
    /// The initial refresh secret.
    pub refresh_secret: RefreshSecret,
}

/// Result of a successful refresh rotation.
#[derive(Debug, Clone)]
pub struct RotatedRefresh {
    /// The replacement refresh secret.
    pub refresh_secret: RefreshSecret,
    /// Owning user, for minting the accompanying access credential.
    pub user_id: UserId,
    /// Role bound at issuance.
    pub role: Role,
}

/// Owns the session lifecycle against the shared store.
#[derive(Debug, Clone)]
pub struct SessionAuthority {
    /// Shared session store.
    store: Arc<StoreManager>,
    /// Session lifecycle configuration.
    config: SessionConfig,
}

impl SessionAuthority {
    /// Creates a new session authority.
    pub fn new(store: Arc<StoreManager>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.config.idle_timeout_seconds)
    }

    /// Issues a new session for an already-verified identity.
    ///
    /// If the user's pointer names a session that is still present in the
    /// store, the configured concurrency policy decides: `BlockNew` fails
    /// with `ALREADY_LOGGED_IN` and changes nothing; `KickOld` invalidates
    /// the competing session first. The pointer lookup, the optional
    /// kick, and the new writes are deliberately sequential: the old
    /// session's deletion must land before the new records so a late
    /// delete cannot clobber them. Two concurrent issues for one user are
    /// not serialized beyond that: whichever finishes last owns the
    /// pointer, and the losing login is simply superseded.
    pub async fn issue(&self, user_id: UserId, role: Role) -> AppResult<IssuedSession> {
        let pointer_key = keys::user_session(user_id);

        if let Some(existing) = self.store.get(&pointer_key).await? {
            let live = match SessionId::parse(&existing) {
                Ok(sid) => self.store.exists(&keys::session(&sid)).await?.then_some(sid),
                Err(_) => None,
            };

            if let Some(old_sid) = live {
                match self.config.concurrency_policy {
                    ConcurrencyPolicy::BlockNew => {
                        debug!(user_id = %user_id, "login rejected: session already live");
                        return Err(AppError::already_logged_in(
                            "user already has an active session",
                        ));
                    }
                    ConcurrencyPolicy::KickOld => {
                        info!(
                            user_id = %user_id,
                            kicked_session = %old_sid,
                            "kicking existing session for new login"
                        );
                        self.invalidate_by_sid(&old_sid).await?;
                    }
                }
            }
        }

        let session_id = SessionId::generate();
        let refresh_secret = RefreshSecret::generate();
        let record = SessionRecord::new(user_id, role, &refresh_secret);

        let ttl = self.idle_ttl();
        self.store
            .set_json(&keys::session(&session_id), &record, ttl)
            .await?;
        self.store.set(&pointer_key, session_id.as_str(), ttl).await?;

        info!(user_id = %user_id, session_id = %session_id, role = %role, "session issued");

        Ok(IssuedSession {
            session_id,
            refresh_secret,
        })
    }

    /// Renews a session's idle life.
    ///
    /// A missing record is not an error; the session has lapsed and the
    /// caller's credential is simply no longer backed by anything.
    pub async fn touch(&self, session_id: &SessionId) -> AppResult<()> {
        let session_key = keys::session(session_id);
        let Some(mut record) = self.store.get_json::<SessionRecord>(&session_key).await? else {
            return Ok(());
        };

        record.last_seen_at = Utc::now();
        let ttl = self.idle_ttl();
        self.store.set_json(&session_key, &record, ttl).await?;
        self.renew_pointer(record.user_id, session_id, ttl).await?;

        Ok(())
    }

    /// Whether the given session is the user's live, current session.
    ///
    /// Both halves matter: the record must exist, and the user's pointer
    /// must name exactly this session. An old, not-yet-expired session
    /// whose owner has since logged in elsewhere passes the first check
    /// and fails the second.
    pub async fn is_active(&self, session_id: &SessionId, user_id: UserId) -> AppResult<bool> {
        if !self.store.exists(&keys::session(session_id)).await? {
            return Ok(false);
        }
        let pointer = self.store.get(&keys::user_session(user_id)).await?;
        Ok(pointer.as_deref() == Some(session_id.as_str()))
    }

    /// Rotates the session's refresh secret, enforcing single use.
    ///
    /// Presenting a secret that does not match the stored digest is
    /// treated as credential theft, not a typo: a replayed
    /// already-rotated secret is indistinguishable from an attacker, so
    /// the session is destroyed outright and the caller gets
    /// `REFRESH_REUSED`. The digest compare and the overwrite are two
    /// store calls; the narrow double-presentation window between them
    /// is an accepted limitation of this design.
    pub async fn rotate_refresh(
        &self,
        session_id: &SessionId,
        presented: &RefreshSecret,
    ) -> AppResult<RotatedRefresh> {
        let session_key = keys::session(session_id);
        let Some(mut record) = self.store.get_json::<SessionRecord>(&session_key).await? else {
            return Err(AppError::session_expired("session no longer exists"));
        };

        if record.refresh_secret_hash != presented.digest() {
            warn!(
                user_id = %record.user_id,
                session_id = %session_id,
                event = "refresh_reuse_detected",
                "presented refresh secret does not match current digest; destroying session"
            );
            self.invalidate_by_sid(session_id).await?;
            return Err(AppError::refresh_reused(
                "refresh secret was already rotated; session has been invalidated",
            ));
        }

        let next = RefreshSecret::generate();
        record.refresh_secret_hash = next.digest();
        record.last_seen_at = Utc::now();

        let ttl = self.idle_ttl();
        self.store.set_json(&session_key, &record, ttl).await?;
        self.renew_pointer(record.user_id, session_id, ttl).await?;

        debug!(user_id = %record.user_id, session_id = %session_id, "refresh secret rotated");

        Ok(RotatedRefresh {
            refresh_secret: next,
            user_id: record.user_id,
            role: record.role,
        })
    }

    /// Invalidates a session and its owner's pointer. Idempotent:
    /// invalidating an already-gone session is a no-op.
    pub async fn invalidate_by_sid(&self, session_id: &SessionId) -> AppResult<()> {
        let session_key = keys::session(session_id);
        let Some(record) = self.store.get_json::<SessionRecord>(&session_key).await? else {
            return Ok(());
        };

        self.store.delete(&session_key).await?;
        self.store.delete(&keys::user_session(record.user_id)).await?;

        info!(user_id = %record.user_id, session_id = %session_id, "session invalidated");
        Ok(())
    }

    /// Probes for the user's current live session without mutating any
    /// state. Returns `None` when the pointer is absent or dangling.
    pub async fn probe(&self, user_id: UserId) -> AppResult<Option<SessionId>> {
        let Some(pointer) = self.store.get(&keys::user_session(user_id)).await? else {
            return Ok(None);
        };
        let Ok(session_id) = SessionId::parse(&pointer) else {
            return Ok(None);
        };
        if self.store.exists(&keys::session(&session_id)).await? {
            Ok(Some(session_id))
        } else {
            Ok(None)
        }
    }

    /// Forcibly evicts whatever session the user currently holds.
    /// Idempotent; also clears a dangling pointer left by an expired
    /// session.
    pub async fn evict(&self, user_id: UserId) -> AppResult<()> {
        match self.probe(user_id).await? {
            Some(session_id) => self.invalidate_by_sid(&session_id).await,
            None => self.store.delete(&keys::user_session(user_id)).await,
        }
    }

    /// Issues a short-lived one-time hand-off token for a split login
    /// flow: the primary factor has been verified, the session will only
    /// be issued once the second step redeems the token.
    pub async fn issue_handoff(&self, user_id: UserId, role: Role) -> AppResult<HandoffToken> {
        let token = HandoffToken::generate();
        let identity = VerifiedIdentity { user_id, role };
        let ttl = Duration::from_secs(self.config.handoff_ttl_seconds);

        let stored = self
            .store
            .set_nx(
                &keys::handoff(&token),
                &serde_json::to_string(&identity)?,
                ttl,
            )
            .await?;
        if !stored {
            return Err(AppError::internal("hand-off token collision"));
        }

        debug!(user_id = %user_id, "hand-off token issued");
        Ok(token)
    }

    /// Redeems a hand-off token, consuming it atomically. A second
    /// redemption, or one after the TTL, fails with `HANDOFF_INVALID`.
    pub async fn redeem_handoff(&self, token: &HandoffToken) -> AppResult<VerifiedIdentity> {
        let Some(raw) = self.store.get_del(&keys::handoff(token)).await? else {
            return Err(AppError::handoff_invalid(
                "hand-off token is expired or already used",
            ));
        };
        let identity: VerifiedIdentity = serde_json::from_str(&raw)?;
        Ok(identity)
    }

    /// Re-applies the idle TTL to the user's pointer if it still names
    /// this session. The record and the pointer must never diverge in
    /// liveness for longer than a single operation.
    async fn renew_pointer(
        &self,
        user_id: UserId,
        session_id: &SessionId,
        ttl: Duration,
    ) -> AppResult<()> {
        let pointer_key = keys::user_session(user_id);
        if let Some(pointer) = self.store.get(&pointer_key).await? {
            if pointer == session_id.as_str() {
                self.store.expire(&pointer_key, ttl).await?;
            }
        }
        Ok(())
    }
}
