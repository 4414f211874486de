//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Twig has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$TWIG_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/twig/config.toml`
//! 3. `~/.twig/config.toml`
//!
//! # Repo Config Location
//!
//! `.twig/config.toml`, read through the repository's [`Storage`] so that
//! in-memory repositories carry their config too.
//!
//! # Example
//!
//! ```
//! use twig::core::config::{Config, RepoConfig};
//! use twig::core::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let repo = RepoConfig {
//!     default_branch: Some("main".to_string()),
//!     ..Default::default()
//! };
//! Config::write_repo(&storage, &repo).unwrap();
//!
//! let config = Config::load_repo_only(&storage).unwrap();
//! assert_eq!(config.default_branch(), "main");
//! ```

pub mod schema;

pub use schema::{GlobalConfig, LogConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::REPO_CONFIG;
use crate::core::storage::{Storage, StorageError};

/// Branch created by `init` when nothing is configured.
pub const DEFAULT_BRANCH: &str = "master";

/// Log date format when nothing is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("repository config storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically: repo config overrides
/// global config, which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo` is provided, also loads the repo-specific config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(repo: Option<&dyn Storage>) -> Result<Config, ConfigError> {
        let global = Self::load_global()?;
        let repo = match repo {
            Some(storage) => Self::read_repo_config(storage)?,
            None => None,
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(Config { global, repo })
    }

    /// Load only the repo config, ignoring global files.
    pub fn load_repo_only(repo: &dyn Storage) -> Result<Config, ConfigError> {
        let repo = Self::read_repo_config(repo)?;
        if let Some(ref r) = repo {
            r.validate()?;
        }
        Ok(Config {
            repo,
            ..Default::default()
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<GlobalConfig, ConfigError> {
        // 1. Check $TWIG_CONFIG
        if let Ok(path) = std::env::var("TWIG_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::read_global_config(&path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/twig/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("twig/config.toml");
            if path.exists() {
                return Self::read_global_config(&path);
            }
        }

        // 3. Check ~/.twig/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".twig/config.toml");
            if path.exists() {
                return Self::read_global_config(&path);
            }
        }

        Ok(GlobalConfig::default())
    }

    /// Read and parse a global config file.
    pub fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse the repo config record, if present.
    fn read_repo_config(storage: &dyn Storage) -> Result<Option<RepoConfig>, ConfigError> {
        let Some(bytes) = storage.read(REPO_CONFIG)? else {
            return Ok(None);
        };
        let contents = String::from_utf8_lossy(&bytes);
        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                path: PathBuf::from(REPO_CONFIG),
                message: e.to_string(),
            })
    }

    /// Write repo config through the repository's storage.
    pub fn write_repo(storage: &dyn Storage, config: &RepoConfig) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        storage.write(REPO_CONFIG, contents.as_bytes())?;
        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Name of the branch `init` creates.
    ///
    /// Defaults to "master" if not configured.
    pub fn default_branch(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.default_branch.as_deref())
            .or(self.global.default_branch.as_deref())
            .unwrap_or(DEFAULT_BRANCH)
    }

    /// chrono format string used for log dates.
    pub fn date_format(&self) -> &str {
        let repo = self
            .repo
            .as_ref()
            .and_then(|r| r.log.as_ref())
            .and_then(|l| l.date_format.as_deref());
        let global = self
            .global
            .log
            .as_ref()
            .and_then(|l| l.date_format.as_deref());
        repo.or(global).unwrap_or(DEFAULT_DATE_FORMAT)
    }

    /// The repo config to persist at `init`, with defaults made explicit.
    pub fn initial_repo_config(&self) -> RepoConfig {
        let mut repo = self.repo.clone().unwrap_or_default();
        repo.default_branch = Some(self.default_branch().to_string());
        repo
    }

}
