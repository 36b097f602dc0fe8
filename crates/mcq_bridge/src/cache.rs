use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use mcq_core::McqResponse;
use mcq_logging::{mcq_debug, mcq_error, mcq_warn};
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Slot holding the last settled MCQ result.
pub const RESULT_CACHE_KEY: &str = "mcq";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid cache key {0:?}")]
    InvalidKey(String),
    #[error("cache io error: {0}")]
    Io(#[from] io::Error),
    #[error("cache entry is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cache directory {0:?} is not a directory")]
    NotADirectory(PathBuf),
}

/// External keyed value store.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;
    fn set(&self, key: &str, value: Value) -> Result<(), CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// Process-wide in-memory store.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per slot in a directory.
///
/// Slots are replaced through a temp file and a rename, so a reader never
/// observes a half-written result.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn prepare_dir(&self) -> Result<(), CacheError> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(CacheError::NotADirectory(self.dir.clone())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(&self.dir)?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        match fs::read_to_string(self.slot_path(key)?) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        let target = self.slot_path(key)?;
        let content = serde_json::to_vec_pretty(&value)?;
        self.prepare_dir()?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&content)?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|err| err.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.slot_path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Moves [`McqResponse`] values in and out of one cache slot.
///
/// Failures are logged and swallowed: losing the cached result only costs
/// a recovery after remount.
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn CacheStore>,
    key: String,
}

impl ResultCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_key(store, RESULT_CACHE_KEY)
    }

    pub fn with_key(store: Arc<dyn CacheStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn read(&self) -> Option<McqResponse> {
        let value = match self.store.get(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(err) => {
                mcq_warn!("Failed to read cache slot {:?}: {}", self.key, err);
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(result) => Some(result),
            Err(err) => {
                mcq_warn!("Ignoring undecodable cache slot {:?}: {}", self.key, err);
                None
            }
        }
    }

    pub fn write(&self, result: &McqResponse) {
        let value = match serde_json::to_value(result) {
            Ok(value) => value,
            Err(err) => {
                mcq_error!("Failed to serialize result for cache: {}", err);
                return;
            }
        };
        match self.store.set(&self.key, value) {
            Ok(()) => mcq_debug!(
                "Cached result with {} question(s) under {:?}",
                result.questions.len(),
                self.key
            ),
            Err(err) => mcq_error!("Failed to write cache slot {:?}: {}", self.key, err),
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.store.remove(&self.key) {
            mcq_error!("Failed to clear cache slot {:?}: {}", self.key, err);
        }
    }
}
