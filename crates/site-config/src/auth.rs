//! Identity provider configuration.

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    String::from("https://identitytoolkit.googleapis.com/v1")
}

fn default_token_endpoint() -> String {
    String::from("https://securetoken.googleapis.com/v1")
}

fn default_keyring_service() -> String {
    String::from("sitelog-cli")
}

const fn default_use_keyring() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Web API key of the identity project.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the account endpoints (`accounts:signInWithPassword`, ...).
    /// Point this at a local emulator for development.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base URL of the secure-token endpoint used to refresh ID tokens.
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// OS keychain service name for stored credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Whether to try the OS keychain before the credentials file.
    #[serde(default = "default_use_keyring")]
    pub use_keyring: bool,

    /// Credentials file override. Empty means `~/.sitelog/credentials`.
    #[serde(default)]
    pub credentials_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            token_endpoint: default_token_endpoint(),
            keyring_service: default_keyring_service(),
            use_keyring: default_use_keyring(),
            credentials_path: String::new(),
        }
    }
}

impl AuthConfig {
    /// Check if the identity provider can be reached at all.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Account endpoint URL for `method` (e.g. `signInWithPassword`).
    #[must_use]
    pub fn account_url(&self, method: &str) -> String {
        format!(
            "{}/accounts:{method}?key={}",
            self.endpoint.trim_end_matches('/'),
            self.api_key
        )
    }

    /// Secure-token refresh URL.
    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!(
            "{}/token?key={}",
            self.token_endpoint.trim_end_matches('/'),
            self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_not_configured() {
        let config = AuthConfig::default();
        assert!(!config.is_configured());
        assert!(config.use_keyring);
        assert_eq!(config.keyring_service, "sitelog-cli");
    }

    #[test]
    fn account_url_includes_method_and_key() {
        let config = AuthConfig {
            api_key: "AIza-test".into(),
            ..Default::default()
        };
        assert_eq!(
            config.account_url("signInWithPassword"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=AIza-test"
        );
    }

    #[test]
    fn urls_tolerate_trailing_slash() {
        let config = AuthConfig {
            api_key: "k".into(),
            endpoint: "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1/".into(),
            token_endpoint: "http://127.0.0.1:9099/securetoken.googleapis.com/v1/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.account_url("signUp"),
            "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1/accounts:signUp?key=k"
        );
        assert_eq!(
            config.refresh_url(),
            "http://127.0.0.1:9099/securetoken.googleapis.com/v1/token?key=k"
        );
    }
}
