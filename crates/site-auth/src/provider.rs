//! Identity provider boundary and its REST implementation.
//!
//! The session gate only talks to [`IdentityProvider`]; [`IdentityToolkit`]
//! speaks the Identity Toolkit account endpoints plus the secure-token refresh
//! endpoint.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use serde::Deserialize;
use site_config::AuthConfig;

use crate::claims::SessionTokens;
use crate::error::AuthError;

/// Fallback lifetime when the provider omits `expiresIn`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Email/password identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange email and password for a session.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, AuthError>;

    /// Create an account and return its first session.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SessionTokens, AuthError>;

    /// Mint a fresh ID token. `email` is carried over because the refresh
    /// response does not include it.
    async fn refresh(&self, refresh_token: &str, email: &str) -> Result<SessionTokens, AuthError>;
}

/// REST client for the Identity Toolkit and secure-token endpoints.
#[derive(Debug, Clone)]
pub struct IdentityToolkit {
    client: reqwest::Client,
    config: AuthConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl IdentityToolkit {
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` if no API key is set.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        })
    }

    async fn account_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, AuthError> {
        let response = self
            .client
            .post(self.config.account_url(method))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("{method}: {e}")))?;

        let body: AccountResponse = read_json(response, method).await?;
        Ok(SessionTokens {
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            user_id: body.local_id,
            email: if body.email.is_empty() {
                email.to_string()
            } else {
                body.email
            },
            expires_at: expiry_from(body.expires_in.as_deref()),
        })
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkit {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, AuthError> {
        self.account_call("signInWithPassword", email, password)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SessionTokens, AuthError> {
        self.account_call("signUp", email, password).await
    }

    async fn refresh(&self, refresh_token: &str, email: &str) -> Result<SessionTokens, AuthError> {
        let response = self
            .client
            .post(self.config.refresh_url())
            .json(&serde_json::json!({
                "grant_type": "refresh_token",
                "refresh_token": refresh_token,
            }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("refresh: {e}")))?;

        let body: RefreshResponse = read_json(response, "refresh").await?;
        Ok(SessionTokens {
            id_token: body.id_token,
            refresh_token: if body.refresh_token.is_empty() {
                refresh_token.to_string()
            } else {
                body.refresh_token
            },
            user_id: body.user_id,
            email: email.to_string(),
            expires_at: expiry_from(body.expires_in.as_deref()),
        })
    }
}

/// Stand-in used when no API key is configured: every call fails with
/// `AuthError::NotConfigured`, while stored sessions can still be restored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl IdentityProvider for Unconfigured {
    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<SessionTokens, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<SessionTokens, AuthError> {
        Err(AuthError::NotConfigured)
    }

    async fn refresh(&self, _refresh_token: &str, _email: &str) -> Result<SessionTokens, AuthError> {
        Err(AuthError::NotConfigured)
    }
}

/// The Identity Toolkit client when `[auth]` has an API key, otherwise
/// [`Unconfigured`].
#[must_use]
pub fn from_config(config: &AuthConfig) -> std::sync::Arc<dyn IdentityProvider> {
    match IdentityToolkit::from_config(config) {
        Ok(toolkit) => std::sync::Arc::new(toolkit),
        Err(_) => {
            tracing::debug!("identity provider not configured; sign-in is unavailable");
            std::sync::Arc::new(Unconfigured)
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, AuthError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AuthError::Provider(format!("{context}: read body: {e}")))?;

    if !status.is_success() {
        let code = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|env| env.error.message)
            .unwrap_or_default();
        return Err(classify_error(&code, status.as_u16()));
    }

    serde_json::from_str(&text)
        .map_err(|e| AuthError::Provider(format!("{context}: parse response: {e}")))
}

/// Map a provider error code (e.g. `INVALID_PASSWORD : detail`) to an `AuthError`.
///
/// Server errors, throttling, and bodies without an error code are
/// `AuthError::Provider`: the request may succeed later.
#[must_use]
pub fn classify_error(message: &str, status: u16) -> AuthError {
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED"
        | "INVALID_EMAIL" | "MISSING_PASSWORD" => AuthError::InvalidCredentials(code.to_string()),
        "EMAIL_EXISTS" => AuthError::AccountExists,
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => AuthError::TokenExpired,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::Provider(code.to_string()),
        "" => AuthError::Provider(format!("HTTP {status} without an error code")),
        other if status >= 500 || status == 429 => {
            AuthError::Provider(format!("HTTP {status}: {other}"))
        }
        other => AuthError::Rejected(other.to_string()),
    }
}

fn expiry_from(expires_in: Option<&str>) -> chrono::DateTime<Utc> {
    let secs = expires_in
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    Utc::now() + TimeDelta::seconds(secs)
}
