use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use site_core::identity::Identity;

use crate::error::AuthError;

/// Tokens and account fields of a signed-in session.
///
/// Produced by the identity provider on sign-in, sign-up, or refresh, persisted
/// by the token store, and held by the session gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokens {
    /// Short-lived ID token (JWT).
    pub id_token: String,
    /// Long-lived token used to mint a new ID token. Empty when unavailable
    /// (e.g. a token injected through the environment).
    #[serde(default)]
    pub refresh_token: String,
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    /// ID token expiration time.
    pub expires_at: DateTime<Utc>,
}

impl SessionTokens {
    /// Convert to a lightweight `Identity` for cross-crate passing.
    #[must_use]
    pub fn to_identity(&self) -> Identity {
        Identity {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }

    /// Check if the ID token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }

    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Build tokens from a bare ID token by reading its claims.
    ///
    /// # Errors
    ///
    /// See [`decode_claims`].
    pub fn from_id_token(id_token: &str) -> Result<Self, AuthError> {
        let claims = decode_claims(id_token)?;
        Ok(Self {
            id_token: id_token.to_string(),
            refresh_token: String::new(),
            user_id: claims.user_id,
            email: claims.email.unwrap_or_default(),
            expires_at: claims.expires_at,
        })
    }
}

/// Claims read from an ID token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: String,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Decode the ID token payload without verifying the signature.
///
/// The provider verifies tokens on every backend call; this is only used to
/// read expiry and account fields for local display and gating.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `sub`/`exp`
/// claims are missing or cannot be parsed.
pub fn decode_claims(jwt: &str) -> Result<TokenClaims, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;

    let user_id = value["user_id"]
        .as_str()
        .or_else(|| value["sub"].as_str())
        .ok_or_else(|| AuthError::Other("missing sub claim".into()))?
        .to_string();
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    let expires_at = DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))?;

    Ok(TokenClaims {
        user_id,
        email: value["email"].as_str().map(String::from),
        expires_at,
    })
}
