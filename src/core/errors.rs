//! ALH-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, AlhError>;

/// Top-level error type for Account Listing Helper.
#[derive(Debug, Error)]
pub enum AlhError {
    #[error("[ALH-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[ALH-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[ALH-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[ALH-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[ALH-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[ALH-4001] no readable content in account folder {path}")]
    NoReadableContent { path: PathBuf },

    #[error("[ALH-4002] no account with id {id}")]
    AccountNotFound { id: u32 },
}

impl AlhError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "ALH-1001",
            Self::MissingConfig { .. } => "ALH-1002",
            Self::ConfigParse { .. } => "ALH-1003",
            Self::Serialization { .. } => "ALH-2101",
            Self::Io { .. } => "ALH-3002",
            Self::NoReadableContent { .. } => "ALH-4001",
            Self::AccountNotFound { .. } => "ALH-4002",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for AlhError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for AlhError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<AlhError> {
        vec![
            AlhError::InvalidConfig {
                details: String::new(),
            },
            AlhError::MissingConfig {
                path: PathBuf::new(),
            },
            AlhError::ConfigParse {
                context: "",
                details: String::new(),
            },
            AlhError::Serialization {
                context: "",
                details: String::new(),
            },
            AlhError::Io {
                path: PathBuf::new(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "test"),
            },
            AlhError::NoReadableContent {
                path: PathBuf::new(),
            },
            AlhError::AccountNotFound { id: 0 },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let codes: Vec<&str> = all_variants().iter().map(|e| e.code()).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn error_codes_have_alh_prefix() {
        for err in &all_variants() {
            assert!(
                err.code().starts_with("ALH-"),
                "code {} must start with ALH-",
                err.code()
            );
        }
    }

    #[test]
    fn error_display_includes_code() {
        let err = AlhError::InvalidConfig {
            details: "bad value".to_string(),
        };
        let msg = err.to_string();
        assert!(
            msg.contains("ALH-1001"),
            "display should contain error code: {msg}"
        );
        assert!(
            msg.contains("bad value"),
            "display should contain details: {msg}"
        );
    }

    #[test]
    fn only_io_is_retryable() {
        for err in &all_variants() {
            assert_eq!(err.is_retryable(), matches!(err, AlhError::Io { .. }));
        }
    }

    #[test]
    fn io_convenience_constructor() {
        let err = AlhError::io(
            "/tmp/acc/info.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.code(), "ALH-3002");
        assert!(err.to_string().contains("/tmp/acc/info.txt"));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AlhError = json_err.into();
        assert_eq!(err.code(), "ALH-2101");
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let err: AlhError = toml_err.into();
        assert_eq!(err.code(), "ALH-1003");
    }
}
