use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::auth::{TokenError, TokenIssuer};
use crate::config::AppConfig;
use crate::database::{AccountStore, DatabaseManager, EntryStore, MemoryStore, PgStore};
use crate::services::{EntryService, IdentityService};

/// Everything a handler needs, cloned into each request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub entries: EntryService,
    pub identity: IdentityService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        entries: Arc<dyn EntryStore>,
        accounts: Arc<dyn AccountStore>,
    ) -> Result<Self, TokenError> {
        let tokens = Arc::new(TokenIssuer::from_config(&config.security)?);
        Ok(Self {
            config: Arc::new(config),
            entries: EntryService::new(entries),
            identity: IdentityService::new(accounts, tokens),
        })
    }

    /// State backed by a fresh process-local store
    pub fn in_memory(config: AppConfig) -> Result<Self, TokenError> {
        let store = Arc::new(MemoryStore::new());
        Self::new(config, store.clone(), store)
    }

    /// Pick the backend from configuration: PostgreSQL when a URL is set, memory otherwise
    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        if config.database.url.is_none() {
            warn!("DATABASE_URL not set; entries are kept in memory and lost on restart");
            return Self::in_memory(config).context("failed to configure token signing");
        }

        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        let store = Arc::new(PgStore::new(pool));
        store
            .ensure_schema()
            .await
            .context("failed to prepare database schema")?;
        info!("Using PostgreSQL store");

        Self::new(config, store.clone(), store).context("failed to configure token signing")
    }

    pub fn tokens(&self) -> &TokenIssuer {
        self.identity.tokens()
    }
}
