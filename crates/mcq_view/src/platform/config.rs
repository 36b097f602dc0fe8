use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mcq_bridge::{CacheStore, FileCacheStore, MemoryCacheStore, ResultCache, RESULT_CACHE_KEY};
use mcq_core::Messages;
use mcq_logging::{mcq_info, mcq_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

const DEFAULT_LOG_FILE: &str = "mcq_view.log";

/// Host-provided settings, read from a RON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub cache_key: String,
    /// Keep the cache slot on disk here; in memory when unset.
    pub cache_dir: Option<PathBuf>,
    pub messages: Messages,
    pub log_destination: LogDestination,
    /// Used when `log_destination` includes a file.
    pub log_file: PathBuf,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cache_key: RESULT_CACHE_KEY.to_string(),
            cache_dir: None,
            messages: Messages::default(),
            log_destination: LogDestination::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ViewConfig {
    pub fn cache_store(&self) -> Arc<dyn CacheStore> {
        match &self.cache_dir {
            Some(dir) => Arc::new(FileCacheStore::new(dir.clone())),
            None => Arc::new(MemoryCacheStore::new()),
        }
    }

    pub fn result_cache(&self, store: Arc<dyn CacheStore>) -> ResultCache {
        ResultCache::with_key(store, self.cache_key.clone())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

pub fn read_config(path: &Path) -> Result<ViewConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(ron::from_str(&content)?)
}

/// Reads `path`, falling back to defaults when it is missing or invalid.
pub fn load_config(path: &Path) -> ViewConfig {
    match read_config(path) {
        Ok(config) => {
            mcq_info!("Loaded config from {:?}", path);
            config
        }
        Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            ViewConfig::default()
        }
        Err(err) => {
            mcq_warn!("Using default config, {:?} is unusable: {}", path, err);
            ViewConfig::default()
        }
    }
}
