//! Session gate: owns the current session and broadcasts its state.
//!
//! The gate never navigates. Consumers call [`SessionGate::subscribe`] and
//! react to `Authenticated` / `Unauthenticated` transitions themselves.

use std::sync::Arc;

use site_core::identity::Identity;
use tokio::sync::{Mutex, watch};

use crate::claims::SessionTokens;
use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::token_store::{TOKEN_ENV_VAR, TokenStore};

/// Tokens expiring within this window are treated as expired.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(Identity),
    #[default]
    Unauthenticated,
}

impl SessionState {
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

pub struct SessionGate {
    provider: Arc<dyn IdentityProvider>,
    store: TokenStore,
    tokens: Mutex<Option<SessionTokens>>,
    state: watch::Sender<SessionState>,
}

impl SessionGate {
    /// Create a gate in the `Unauthenticated` state. Call [`Self::restore`] to
    /// pick up persisted credentials.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, store: TokenStore) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            provider,
            store,
            tokens: Mutex::new(None),
            state,
        }
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Live stream of session transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub const fn token_store(&self) -> &TokenStore {
        &self.store
    }

    /// ID token of the held session, for authorizing backend calls.
    pub async fn id_token(&self) -> Option<String> {
        self.tokens.lock().await.as_ref().map(|t| t.id_token.clone())
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for empty input or rejected
    /// credentials, and provider errors otherwise. State is unchanged on error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = require_credentials(email, password)?;
        let tokens = self.provider.sign_in_with_password(email, password).await?;
        tracing::info!(user_id = %tokens.user_id, "signed in");
        Ok(self.establish(tokens).await)
    }

    /// Create an account and sign in to it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccountExists` if the email is taken; see
    /// [`Self::sign_in`] for the rest.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = require_credentials(email, password)?;
        let tokens = self.provider.sign_up(email, password).await?;
        tracing::info!(user_id = %tokens.user_id, "account created");
        Ok(self.establish(tokens).await)
    }

    /// Reload persisted credentials, refreshing an expired ID token if a
    /// refresh token is available.
    pub async fn restore(&self) -> SessionState {
        let Some(tokens) = self.store.load() else {
            tracing::debug!("no stored session");
            self.clear().await;
            return SessionState::Unauthenticated;
        };

        if !tokens.is_near_expiry(EXPIRY_BUFFER_SECS) {
            self.establish_in_memory(tokens).await;
            return self.state();
        }

        self.refresh_or_expire(tokens).await
    }

    /// Re-check the held token. Refreshes it when near expiry, and drops to
    /// `Unauthenticated` when it cannot be refreshed.
    pub async fn check_expiry(&self) -> SessionState {
        let held = self.tokens.lock().await.clone();
        match held {
            Some(tokens) if tokens.is_near_expiry(EXPIRY_BUFFER_SECS) => {
                self.refresh_or_expire(tokens).await
            }
            Some(_) => self.state(),
            None => {
                self.clear().await;
                SessionState::Unauthenticated
            }
        }
    }

    /// Remove stored credentials and end the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credentials cannot be removed;
    /// the session stays active in that case.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.delete()?;
        self.clear().await;
        if TokenStore::env_token_present() {
            tracing::warn!(
                "signed out, but {TOKEN_ENV_VAR} is still set; the next restore signs in from it"
            );
        } else {
            tracing::info!("signed out");
        }
        Ok(())
    }

    // --- Private helpers ---

    async fn refresh_or_expire(&self, tokens: SessionTokens) -> SessionState {
        if !tokens.can_refresh() {
            tracing::warn!(expires_at = %tokens.expires_at, "session expired and cannot be refreshed");
            self.clear().await;
            return SessionState::Unauthenticated;
        }

        match self
            .provider
            .refresh(&tokens.refresh_token, &tokens.email)
            .await
        {
            Ok(fresh) => {
                tracing::debug!(user_id = %fresh.user_id, "session refreshed");
                self.establish(fresh).await;
            }
            Err(error @ (AuthError::TokenExpired | AuthError::InvalidCredentials(_))) => {
                tracing::warn!(%error, "session refresh rejected; discarding stored credentials");
                if let Err(error) = self.store.delete() {
                    tracing::warn!(%error, "failed to discard stored credentials");
                }
                self.clear().await;
            }
            Err(error) => {
                // Only a revoked refresh token discards credentials; keep them
                // for the next attempt.
                tracing::warn!(%error, "could not refresh session");
                self.clear().await;
            }
        }
        self.state()
    }

    async fn establish(&self, tokens: SessionTokens) -> Identity {
        if let Err(error) = self.store.store(&tokens) {
            tracing::warn!(%error, "session is active but could not be persisted");
        }
        self.establish_in_memory(tokens).await
    }

    async fn establish_in_memory(&self, tokens: SessionTokens) -> Identity {
        let identity = tokens.to_identity();
        *self.tokens.lock().await = Some(tokens);
        self.state
            .send_replace(SessionState::Authenticated(identity.clone()));
        identity
    }

    async fn clear(&self) {
        *self.tokens.lock().await = None;
        self.state.send_if_modified(|state| {
            if state.is_authenticated() {
                *state = SessionState::Unauthenticated;
                true
            } else {
                false
            }
        });
    }
}

fn require_credentials<'a>(email: &'a str, password: &str) -> Result<&'a str, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidCredentials(
            "email and password are required".into(),
        ));
    }
    Ok(email)
}
