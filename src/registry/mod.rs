//! Account registry: numbered accounts over a base folder, plus the
//! remembered last base path.
//!
//! The registry is a thin in-memory index. Each subfolder of the base
//! directory is one account; parsing and listing generation happen
//! elsewhere and only report status back here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assemble::FileSource;
use crate::core::errors::{AlhError, Result};

/// One subfolder of the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFolder {
    pub name: String,
    pub path: PathBuf,
}

/// Directory enumeration behind a seam, mirroring `FileSource`.
pub trait DirectorySource {
    /// Immediate subfolders of `base`, sorted by name.
    fn list_subfolders(&self, base: &Path) -> Result<Vec<AccountFolder>>;
}

/// Production source backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectorySource;

impl DirectorySource for FsDirectorySource {
    fn list_subfolders(&self, base: &Path) -> Result<Vec<AccountFolder>> {
        let entries =
            fs::read_dir(base).map_err(|error| AlhError::io(base, error))?;
        let mut folders = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|error| AlhError::io(base, error))?;
            let is_dir = entry
                .file_type()
                .map_err(|error| AlhError::io(entry.path(), error))?
                .is_dir();
            if is_dir {
                folders.push(AccountFolder {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry.path(),
                });
            }
        }
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }
}

/// Lifecycle of one account within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Loaded,
    Processing,
    Listed,
    Error,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Loaded => "loaded",
            Self::Processing => "processing",
            Self::Listed => "listed",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// One registered account. `files` is filled lazily on first request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: u32,
    pub name: String,
    pub path: PathBuf,
    pub status: AccountStatus,
    pub files: Option<Vec<String>>,
}

/// In-memory index of the currently loaded base folder.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    base_path: PathBuf,
    next_id: u32,
}

impl AccountRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            base_path: PathBuf::new(),
            next_id: 1,
        }
    }

    /// Replace the current account set with the subfolders of `base`.
    ///
    /// Ids keep counting across loads within one session so a stale id from
    /// a previous load can never alias a fresh account.
    pub fn load_from<D: DirectorySource>(&mut self, source: &D, base: &Path) -> Result<usize> {
        let folders = source.list_subfolders(base)?;
        self.base_path = base.to_path_buf();
        self.accounts = folders
            .into_iter()
            .map(|folder| {
                let id = self.next_id;
                self.next_id += 1;
                Account {
                    id,
                    name: folder.name,
                    path: folder.path,
                    status: AccountStatus::Loaded,
                    files: None,
                }
            })
            .collect();
        debug!(
            base = %base.display(),
            count = self.accounts.len(),
            "loaded account folders"
        );
        Ok(self.accounts.len())
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    #[must_use]
    pub fn account(&self, id: u32) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Update one account's status. Returns false when the id is unknown.
    pub fn set_status(&mut self, id: u32, status: AccountStatus) -> bool {
        match self.accounts.iter_mut().find(|account| account.id == id) {
            Some(account) => {
                account.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove one account. Returns false when the id is unknown.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|account| account.id != id);
        self.accounts.len() != before
    }

    /// Drop every account and restart id numbering.
    pub fn clear(&mut self) {
        self.accounts.clear();
        self.base_path = PathBuf::new();
        self.next_id = 1;
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    /// Last component of the base path, empty when nothing is loaded.
    #[must_use]
    pub fn base_folder_name(&self) -> String {
        self.base_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.base_path.display().to_string())
    }

    /// File names of one account, listed once and cached on the account.
    pub fn files_for(&mut self, id: u32, source: &dyn FileSource) -> Result<Vec<String>> {
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or(AlhError::AccountNotFound { id })?;
        if let Some(files) = &account.files {
            return Ok(files.clone());
        }
        let files = source.list_files(&account.path)?;
        account.files = Some(files.clone());
        Ok(files)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RememberedPath {
    base_path: PathBuf,
}

/// Remembers the last base folder between runs.
#[derive(Debug, Clone)]
pub struct PathMemory {
    path: PathBuf,
}

impl PathMemory {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The remembered base path, or `None` when nothing usable is stored.
    #[must_use]
    pub fn load(&self) -> Option<PathBuf> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<RememberedPath>(&raw) {
            Ok(remembered) => Some(remembered.base_path),
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "last folder file is corrupt, ignoring it"
                );
                None
            }
        }
    }

    /// Persist `base` as the remembered path, atomically.
    pub fn save(&self, base: &Path) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|error| AlhError::io(parent, error))?;
        }
        let data = serde_json::to_vec_pretty(&RememberedPath {
            base_path: base.to_path_buf(),
        })?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, data)
            .map_err(|error| AlhError::io(&tmp_path, error))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|error| AlhError::io(&self.path, error))?;
        Ok(())
    }

    /// Forget the remembered path. Idempotent.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AlhError::io(&self.path, error)),
        }
    }
}
