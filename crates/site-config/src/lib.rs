//! # site-config
//!
//! Layered configuration loading for sitelog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SITELOG_*` prefix, `__` as separator)
//! 2. Project-level `.sitelog/config.toml`
//! 3. User-level `~/.config/sitelog/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SITELOG_AUTH__API_KEY` -> `auth.api_key`,
//! `SITELOG_PHOTOS__BACKEND` -> `photos.backend`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use site_config::SiteConfig;
//!
//! let config = SiteConfig::load_with_dotenv().expect("config");
//!
//! if config.store.is_remote() {
//!     println!("remote store: {}", config.store.url);
//! }
//! ```

mod auth;
mod error;
mod general;
mod photos;
mod store;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use photos::{PhotoBackend, PhotosConfig};
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub photos: PhotosConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SiteConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse, and
    /// `ConfigError::InvalidValue` if the logger roster is empty.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical entry
    /// point for the CLI.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".sitelog/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SITELOG_").split("__"))
    }

    /// Cross-field checks figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty or blank logger roster.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.loggers.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.loggers".into(),
                reason: "at least one logger name is required".into(),
            });
        }
        if self.general.loggers.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "general.loggers".into(),
                reason: "logger names must not be blank".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sitelog").join("config.toml"))
    }
}
