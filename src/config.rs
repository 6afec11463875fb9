//! Run configuration.
//!
//! ```yaml
//! endpoint: https://eurapi.hornbill.com/acme/xmlmc
//! page_size: 100
//! remove_both_sides: false
//! dry_run: false
//! ```
//!
//! The API key never lives in the file; it comes from `RELSYNC_API_KEY`,
//! optionally via a `.env` file.

use std::path::Path;

use serde::Deserialize;

use crate::client::PAGE_SIZE;

/// Environment variable holding the instance API key.
pub const API_KEY_VAR: &str = "RELSYNC_API_KEY";

/// Settings for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// XMLMC base URL of the instance.
    pub endpoint: String,
    /// Records requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Passed through to every unlink call.
    #[serde(default)]
    pub remove_both_sides: bool,
    /// Simulate mutations instead of sending them.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_page_size() -> u64 {
    PAGE_SIZE
}

/// Failure to produce a usable [`SyncConfig`] or API key.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid YAML for [`SyncConfig`].
    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A field parsed but holds an unusable value.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// `RELSYNC_API_KEY` is unset or blank.
    #[error("Missing API key (set RELSYNC_API_KEY or add it to .env)")]
    MissingApiKey,
}

impl SyncConfig {
    /// Loads and validates the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parses and validates a config document.
    ///
    /// # Errors
    ///
    /// Same as [`SyncConfig::load`], minus I/O.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks field values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: "must not be empty".to_string(),
            });
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: "must be an http(s) URL".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Reads the API key from the environment, loading `.env` first if present.
///
/// # Errors
///
/// Returns [`ConfigError::MissingApiKey`] when the variable is unset or blank.
pub fn api_key() -> Result<String, ConfigError> {
    let _ = dotenvy::dotenv();
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults() {
        let config = SyncConfig::from_yaml("endpoint: https://example.test/xmlmc\n").unwrap();
        assert_eq!(config.page_size, 100);
        assert!(!config.remove_both_sides);
        assert!(!config.dry_run);
    }

    #[test]
    fn reads_all_fields() {
        let config = SyncConfig::from_yaml(
            "endpoint: https://example.test/xmlmc\npage_size: 25\nremove_both_sides: true\ndry_run: true\n",
        )
        .unwrap();
        assert_eq!(config.page_size, 25);
        assert!(config.remove_both_sides);
        assert!(config.dry_run);
    }

    #[test]
    fn rejects_zero_page_size() {
        let err =
            SyncConfig::from_yaml("endpoint: https://example.test/xmlmc\npage_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "page_size", .. }));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = SyncConfig::from_yaml("endpoint: ftp://example.test\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid config value for endpoint: must be an http(s) URL");
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = SyncConfig::from_yaml("endpoint: https://x.test\napi_key: secret\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SyncConfig::load(Path::new("/nonexistent/relsync.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
