//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use carelink_auth::session::authority::SessionAuthority;
use carelink_auth::token::decoder::TokenDecoder;
use carelink_auth::token::encoder::TokenEncoder;
use carelink_core::config::AppConfig;
use carelink_core::result::AppResult;
use carelink_core::traits::verifier::IdentityVerifier;
use carelink_store::provider::StoreManager;

use crate::verifier::StaticIdentityVerifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session store (Redis or in-memory).
    pub store: Arc<StoreManager>,
    /// Session lifecycle authority.
    pub authority: Arc<SessionAuthority>,
    /// Access credential encoder.
    pub encoder: Arc<TokenEncoder>,
    /// Access credential decoder.
    pub decoder: Arc<TokenDecoder>,
    /// Primary-credential verification port.
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    /// Assemble the full state from configuration.
    ///
    /// The identity verifier defaults to the static development table;
    /// swap it with [`AppState::with_verifier`] when embedding a real
    /// credential service.
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let store = Arc::new(StoreManager::new(&config.store).await?);
        let authority = Arc::new(SessionAuthority::new(store.clone(), config.session.clone()));
        let encoder = Arc::new(TokenEncoder::new(&config.auth));
        let decoder = Arc::new(TokenDecoder::new(&config.auth));
        let verifier: Arc<dyn IdentityVerifier> =
            Arc::new(StaticIdentityVerifier::from_config(&config.auth.static_users));

        Ok(Self {
            config: Arc::new(config),
            store,
            authority,
            encoder,
            decoder,
            verifier,
        })
    }

    /// Replace the identity verifier.
    pub fn with_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}
