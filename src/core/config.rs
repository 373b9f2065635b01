//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{AlhError, Result};

/// Full ALH configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub paths: PathsConfig,
    pub listing: ListingConfig,
    pub telemetry: TelemetryConfig,
}

/// Filesystem paths used by alh.
///
/// Relative state-file paths are resolved under `data_dir` at load time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub usage_stats_file: PathBuf,
    pub last_folder_file: PathBuf,
    pub activity_log_file: PathBuf,
}

/// Listing generation knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListingConfig {
    /// Consult the usage tracker to rank list fields before title packing.
    pub rank_by_scarcity: bool,
}

/// Durable activity logging controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetryConfig {
    pub activity_log_enabled: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!(
                    "[ALH-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths"
                );
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        let cfg = home_dir.join(".config").join("alh").join("config.toml");
        let data = home_dir.join(".local").join("share").join("alh");
        Self {
            config_file: cfg,
            data_dir: data,
            usage_stats_file: PathBuf::from("usage-stats.json"),
            last_folder_file: PathBuf::from("last-folder.json"),
            activity_log_file: PathBuf::from("activity.jsonl"),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            rank_by_scarcity: true,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            activity_log_enabled: true,
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| AlhError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(AlhError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides()?;
        cfg.normalize_paths();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic hash of the effective config for logging/telemetry.
    ///
    /// Uses FNV-1a for cross-process-stable hashing.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(env_var)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("ALH_DATA_DIR") {
            self.paths.data_dir = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("ALH_USAGE_STATS_FILE") {
            self.paths.usage_stats_file = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("ALH_LAST_FOLDER_FILE") {
            self.paths.last_folder_file = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("ALH_ACTIVITY_LOG_FILE") {
            self.paths.activity_log_file = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("ALH_LISTING_RANK_BY_SCARCITY") {
            self.listing.rank_by_scarcity = parse_env_bool("ALH_LISTING_RANK_BY_SCARCITY", &raw)?;
        }
        if let Some(raw) = lookup("ALH_TELEMETRY_ACTIVITY_LOG_ENABLED") {
            self.telemetry.activity_log_enabled =
                parse_env_bool("ALH_TELEMETRY_ACTIVITY_LOG_ENABLED", &raw)?;
        }
        Ok(())
    }

    /// Resolve relative state-file paths under `data_dir`.
    fn normalize_paths(&mut self) {
        for slot in [
            &mut self.paths.usage_stats_file,
            &mut self.paths.last_folder_file,
            &mut self.paths.activity_log_file,
        ] {
            if slot.is_relative() {
                *slot = self.paths.data_dir.join(&*slot);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.paths.data_dir.as_os_str().is_empty() {
            return Err(AlhError::InvalidConfig {
                details: "paths.data_dir must not be empty".to_string(),
            });
        }

        for (name, path) in [
            ("usage_stats_file", &self.paths.usage_stats_file),
            ("last_folder_file", &self.paths.last_folder_file),
            ("activity_log_file", &self.paths.activity_log_file),
        ] {
            if path.file_name().is_none() {
                return Err(AlhError::InvalidConfig {
                    details: format!("paths.{name} must name a file, got {}", path.display()),
                });
            }
        }

        // State files share a directory by default; identical paths would clobber.
        let files = [
            &self.paths.usage_stats_file,
            &self.paths.last_folder_file,
            &self.paths.activity_log_file,
        ];
        for (i, a) in files.iter().enumerate() {
            for b in files.iter().skip(i + 1) {
                if a == b {
                    return Err(AlhError::InvalidConfig {
                        details: format!("state file paths must be distinct, got {}", a.display()),
                    });
                }
            }
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    raw.parse::<bool>().map_err(|error| AlhError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}
