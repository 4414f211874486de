//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$TWIG_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/twig/config.toml`
//! 3. `~/.twig/config.toml` (canonical write location)
//!
//! # Repo Config
//!
//! Located at `.twig/config.toml`, written by `init`.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the default branch must be a valid branch name).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{BranchName, Timestamp};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_branch = "main"
///
/// [log]
/// date_format = "%Y-%m-%d %H:%M:%S"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Branch created by `init`
    pub default_branch: Option<String>,

    /// Log output settings
    pub log: Option<LogConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_default_branch(self.default_branch.as_deref())?;
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// Repository configuration.
///
/// Same keys as [`GlobalConfig`]; values set here win.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Branch created by `init`
    pub default_branch: Option<String>,

    /// Log output settings
    pub log: Option<LogConfig>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_default_branch(self.default_branch.as_deref())?;
        if let Some(log) = &self.log {
            log.validate()?;
        }
        Ok(())
    }
}

/// `[log]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// chrono format string for commit dates
    pub date_format: Option<String>,
}

impl LogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(format) = &self.date_format {
            if !Timestamp::is_valid_format(format) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid log date format '{}'",
                    format
                )));
            }
        }
        Ok(())
    }
}

fn validate_default_branch(name: Option<&str>) -> Result<(), ConfigError> {
    if let Some(name) = name {
        BranchName::new(name).map_err(|e| {
            ConfigError::InvalidValue(format!("invalid default branch name: {}", e))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_global() {
        let config: GlobalConfig = toml::from_str(
            r#"
            default_branch = "main"

            [log]
            date_format = "%Y-%m-%d"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_branch.as_deref(), Some("main"));
        assert_eq!(
            config.log.and_then(|l| l.date_format).as_deref(),
            Some("%Y-%m-%d")
        );
    }

    #[test]
    fn empty_is_default() {
        let config: RepoConfig = toml::from_str("").unwrap();
        assert_eq!(config, RepoConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<RepoConfig>("trunk = \"main\"").is_err());
        assert!(toml::from_str::<GlobalConfig>("[log]\ncolor = true").is_err());
    }

    #[test]
    fn invalid_branch_rejected() {
        let config = RepoConfig {
            default_branch: Some("has space".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn invalid_date_format_rejected() {
        let config = GlobalConfig {
            log: Some(LogConfig {
                date_format: Some(String::new()),
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn serializes_back_to_toml() {
        let config = RepoConfig {
            default_branch: Some("master".to_string()),
            log: None,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: RepoConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
