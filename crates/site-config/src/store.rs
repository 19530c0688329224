//! Document store (libSQL) configuration.

use serde::{Deserialize, Serialize};

fn default_local_path() -> String {
    String::from(".sitelog/issues.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Remote database URL (e.g., `libsql://sitelog-duplex.turso.io`).
    /// Empty means local-only.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Path of the local database file.
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: default_local_path(),
        }
    }
}

impl StoreConfig {
    /// Check if a remote database is configured.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}
