//! Persistence ports for usage counters.
//!
//! `JsonFileStore` is the production backend: one JSON object on disk,
//! written atomically via a sibling tmp file and rename. `MemoryStore`
//! backs tests and one-off runs that should not touch the filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::core::errors::{AlhError, Result};

/// Name to times-used mapping. BTreeMap keeps the serialized form and
/// iteration order deterministic.
pub type UsageCounters = BTreeMap<String, u64>;

/// Storage backend for usage counters.
pub trait UsageStore {
    /// Load the persisted counters. Missing or unreadable state yields an
    /// empty map rather than an error; only hard I/O failures propagate.
    fn load(&self) -> Result<UsageCounters>;

    /// Persist the full counter map, replacing any previous state.
    fn save(&self, counters: &UsageCounters) -> Result<()>;

    /// Drop all persisted state. Idempotent.
    fn clear(&self) -> Result<()>;
}

/// File-backed store writing pretty JSON with atomic rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UsageStore for JsonFileStore {
    fn load(&self) -> Result<UsageCounters> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(UsageCounters::new());
            }
            Err(error) => return Err(AlhError::io(&self.path, error)),
        };
        match serde_json::from_str(&raw) {
            Ok(counters) => Ok(counters),
            Err(error) => {
                // A mangled stats file loses history, not the run.
                warn!(
                    path = %self.path.display(),
                    %error,
                    "usage stats file is corrupt, starting from empty counters"
                );
                Ok(UsageCounters::new())
            }
        }
    }

    fn save(&self, counters: &UsageCounters) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|error| AlhError::io(parent, error))?;
        }

        let data = serde_json::to_vec_pretty(counters)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, data)
            .map_err(|error| AlhError::io(&tmp_path, error))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|error| AlhError::io(&self.path, error))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AlhError::io(&self.path, error)),
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    counters: Mutex<UsageCounters>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing counters.
    #[must_use]
    pub fn with_counters(counters: UsageCounters) -> Self {
        Self {
            counters: Mutex::new(counters),
        }
    }
}

impl UsageStore for MemoryStore {
    fn load(&self) -> Result<UsageCounters> {
        Ok(self
            .counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, counters: &UsageCounters) -> Result<()> {
        *self
            .counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = counters.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}
