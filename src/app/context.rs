use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::{KapitelError, Result};
use crate::config::Config;
use crate::feed::{FeedPipeline, Fetcher, HttpFetcher, RetryPolicy};
use crate::store::sqlite::SqliteStore;

/// Wires together the settings store and feed pipeline from configuration.
pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub pipeline: FeedPipeline,
    pub config: Config,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Ok(Self::with_store(store, config))
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Ok(Self::with_store(store, config))
    }

    fn with_store(store: Arc<SqliteStore>, config: Config) -> Self {
        let proxy = (!config.proxy_base_url.is_empty()).then(|| config.proxy_base_url.clone());
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_config(
            Duration::from_secs(config.timeout_secs),
            proxy,
        ));
        let retry = RetryPolicy {
            max_attempts: config.max_retries,
            base_delay: Duration::from_millis(config.retry_delay_ms),
        };
        let pipeline = FeedPipeline::with_policy(fetcher, retry);

        Self {
            store,
            pipeline,
            config,
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| KapitelError::Config("Could not find data directory".into()))?;
        let kapitel_dir = data_dir.join("kapitel");
        std::fs::create_dir_all(&kapitel_dir)?;
        Ok(kapitel_dir.join("kapitel.db"))
    }
}
