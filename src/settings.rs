//! Process-wide settings for the dataset cache and compression.
//!
//! Resolved once at startup and passed explicitly to
//! [`crate::dataset::Dataset::save`] and [`crate::dataset::Dataset::load`].
//! Settings can come from the environment or from a TOML file:
//!
//! ```toml
//! # giskard.toml
//! home_dir = "/var/lib/giskard-home"
//! cache_dir = "cache"
//! compression_level = 10
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codec::DEFAULT_COMPRESSION_LEVEL;

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "GSK_HOME";

/// Environment variable overriding the cache directory
pub const CACHE_DIR_ENV: &str = "GSK_CACHE_DIR";

/// Errors loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// I/O error reading the settings file
    #[error("Failed to read settings file {path}: {source}")]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML
    #[error("Failed to parse settings: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Cache location and codec settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of all local worker state
    pub home_dir: PathBuf,

    /// Cache directory, relative to `home_dir` unless absolute
    pub cache_dir: PathBuf,

    /// zstd level used when saving (1-22)
    pub compression_level: i32,
}

impl Default for Settings {
    fn default() -> Self {
        let home_dir = std::env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_home_dir);
        let cache_dir = std::env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cache"));

        Self {
            home_dir,
            cache_dir,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl Settings {
    /// Settings rooted at `home_dir` with the default cache layout
    pub fn with_home<P: AsRef<Path>>(home_dir: P) -> Self {
        Self {
            home_dir: home_dir.as_ref().to_path_buf(),
            cache_dir: PathBuf::from("cache"),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Resolve settings from `GSK_HOME` and `GSK_CACHE_DIR`
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file; missing keys fall back to [`Settings::from_env`]
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse settings from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.compression_level = settings.compression_level.clamp(1, 22);
        Ok(settings)
    }

    /// Directory holding every cached dataset of `namespace`
    pub fn namespace_cache_dir(&self, namespace: &str) -> PathBuf {
        self.home_dir.join(&self.cache_dir).join(namespace)
    }

    /// Local cache directory of one dataset:
    /// `<home_dir>/<cache_dir>/<namespace>/datasets/<dataset_id>`
    pub fn dataset_cache_dir(&self, namespace: &str, dataset_id: &str) -> PathBuf {
        self.namespace_cache_dir(namespace)
            .join("datasets")
            .join(dataset_id)
    }
}

fn default_home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("giskard-home")
}
