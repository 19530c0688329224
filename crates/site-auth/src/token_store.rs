use std::fs;
use std::path::{Path, PathBuf};

use site_config::AuthConfig;

use crate::claims::SessionTokens;
use crate::error::AuthError;

const KEYRING_USER: &str = "session";
const CREDENTIALS_FILE_NAME: &str = "credentials";
/// Env var holding a bare ID token, for CI and headless use.
pub const TOKEN_ENV_VAR: &str = "SITELOG_AUTH__TOKEN";

/// Where a loaded session came from (for status display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Persists the signed-in session between CLI invocations.
///
/// Load priority: keyring → `SITELOG_AUTH__TOKEN` env → credentials file.
/// Stores go to the keyring and fall back to the file when it is unavailable.
#[derive(Debug, Clone)]
pub struct TokenStore {
    keyring_service: Option<String>,
    credentials_path: PathBuf,
}

impl TokenStore {
    #[must_use]
    pub const fn new(keyring_service: Option<String>, credentials_path: PathBuf) -> Self {
        Self {
            keyring_service,
            credentials_path,
        }
    }

    /// File-only store, used by tests and headless environments.
    #[must_use]
    pub fn file_only(credentials_path: impl Into<PathBuf>) -> Self {
        Self::new(None, credentials_path.into())
    }

    /// Build the store described by `[auth]` config.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if no credentials path is set and the
    /// home directory cannot be determined.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let path = if config.credentials_path.is_empty() {
            default_credentials_path()?
        } else {
            PathBuf::from(&config.credentials_path)
        };
        let service = config
            .use_keyring
            .then(|| config.keyring_service.clone());
        Ok(Self::new(service, path))
    }

    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Persist `tokens`. Falls back to the file if the keyring is unavailable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if serialization or file storage fails.
    pub fn store(&self, tokens: &SessionTokens) -> Result<(), AuthError> {
        let json = serde_json::to_string(tokens)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;

        if let Some(service) = &self.keyring_service {
            match keyring::Entry::new(service, KEYRING_USER) {
                Ok(entry) => match entry.set_password(&json) {
                    Ok(()) => return Ok(()),
                    Err(error) => {
                        tracing::warn!(%error, "keyring store failed; falling back to file");
                    }
                },
                Err(error) => {
                    tracing::warn!(%error, "keyring unavailable; falling back to file");
                }
            }
        }
        self.store_file(&json)
    }

    /// Load the stored session, if any.
    #[must_use]
    pub fn load(&self) -> Option<SessionTokens> {
        self.load_with_source().map(|(tokens, _)| tokens)
    }

    /// Load the stored session together with the tier it came from.
    #[must_use]
    pub fn load_with_source(&self) -> Option<(SessionTokens, TokenSource)> {
        // 1. Keyring
        if let Some(tokens) = self.load_keyring() {
            return Some((tokens, TokenSource::Keyring));
        }

        // 2. Environment variable (bare ID token, no refresh)
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
            && !token.is_empty()
        {
            match SessionTokens::from_id_token(&token) {
                Ok(tokens) => return Some((tokens, TokenSource::Env)),
                Err(error) => tracing::warn!(%error, "ignoring malformed {TOKEN_ENV_VAR}"),
            }
        }

        // 3. File fallback
        self.load_file().map(|tokens| (tokens, TokenSource::File))
    }

    /// Whether [`TOKEN_ENV_VAR`] is set. [`Self::delete`] cannot clear it, so a
    /// session loaded from it comes back on the next load.
    #[must_use]
    pub fn env_token_present() -> bool {
        std::env::var(TOKEN_ENV_VAR).is_ok_and(|token| !token.is_empty())
    }

    /// Delete stored credentials from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Some(service) = &self.keyring_service
            && let Ok(entry) = keyring::Entry::new(service, KEYRING_USER)
        {
            // May not exist
            let _ = entry.delete_credential();
        }

        let path = &self.credentials_path;
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    // --- Private helpers ---

    fn load_keyring(&self) -> Option<SessionTokens> {
        let service = self.keyring_service.as_ref()?;
        let entry = keyring::Entry::new(service, KEYRING_USER).ok()?;
        let json = entry.get_password().ok()?;
        parse_stored(&json)
    }

    fn store_file(&self, json: &str) -> Result<(), AuthError> {
        let path = &self.credentials_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, json)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<SessionTokens> {
        let content = fs::read_to_string(&self.credentials_path).ok()?;
        parse_stored(&content)
    }
}

fn parse_stored(content: &str) -> Option<SessionTokens> {
    if content.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(content) {
        Ok(tokens) => Some(tokens),
        Err(error) => {
            tracing::warn!(%error, "stored session is unreadable; ignoring it");
            None
        }
    }
}

fn default_credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".sitelog").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("cannot locate a home directory for the credentials file".into())
        })
}
