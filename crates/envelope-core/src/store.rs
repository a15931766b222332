//! Persisted "already tracked" flag.
//!
//! The flag is monotonic: it goes from unset to set exactly once and this
//! crate never clears it. Only the presence of a key matters, not its value.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use envelope_common::StoreError;
use tracing::debug;

use crate::lock;

const APP_NAME: &str = "envelope";

/// Device-scoped boolean flags keyed by name.
pub trait FlagStore: Send + Sync {
    fn is_set(&self, key: &str) -> Result<bool, StoreError>;
    fn set(&self, key: &str) -> Result<(), StoreError>;
}

/// Keeps one marker file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    dir: PathBuf,
}

impl FileFlagStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_dir>/envelope/flags`, if the platform has a data directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_NAME).join("flags"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl FlagStore for FileFlagStore {
    fn is_set(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(key)?.try_exists()?)
    }

    fn set(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, b"true")?;
        debug!("persisted flag {key} at {}", path.display());
        Ok(())
    }
}

/// In-process flag store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    keys: Mutex<HashSet<String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store where `key` is already set.
    pub fn with_flag(key: &str) -> Self {
        let store = Self::new();
        lock(&store.keys).insert(key.to_string());
        store
    }
}

impl FlagStore for MemoryFlagStore {
    fn is_set(&self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        Ok(lock(&self.keys).contains(key))
    }

    fn set(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        lock(&self.keys).insert(key.to_string());
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
