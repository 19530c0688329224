use std::sync::Arc;

use anyhow::Context;
use site_auth::{SessionGate, SessionState, TokenStore};
use site_config::SiteConfig;
use site_dashboard::BackendIssueRepository;
use site_db::SiteDb;
use site_storage::PhotoStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: SiteConfig,
    pub gate: SessionGate,
    pub repository: Arc<BackendIssueRepository>,
}

impl AppContext {
    /// Open the issue store and photo store, and wire them behind a session
    /// gate. The gate starts signed out; call [`Self::restore_session`].
    pub async fn init(config: SiteConfig) -> anyhow::Result<Self> {
        let provider = site_auth::provider::from_config(&config.auth);
        let store = TokenStore::from_config(&config.auth)?;
        let gate = SessionGate::new(provider, store);

        let db = SiteDb::open(&config.store)
            .await
            .context("failed to open issue store")?;
        let photos = PhotoStore::from_config(&config.photos)
            .context("failed to initialize photo storage")?;

        let repository = Arc::new(BackendIssueRepository::new(
            gate.subscribe(),
            Arc::new(db),
            Arc::new(photos),
        ));

        Ok(Self {
            config,
            gate,
            repository,
        })
    }

    /// Pick up the stored session, refreshing it if needed.
    pub async fn restore_session(&self) -> SessionState {
        self.gate.restore().await
    }

    #[must_use]
    pub fn roster(&self) -> Vec<String> {
        self.config.general.loggers.clone()
    }
}
