//! Configuration loading and validation for memoir.
//!
//! Loads configuration from `~/.memoir/config.toml` with environment
//! variable overrides. Validated once at load; the recall engine copies the
//! config at construction and never re-reads it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the context-memory layer.
///
/// Maps directly to `~/.memoir/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RecallConfig {
    /// Master switch. When false, no remote call is ever made.
    #[serde(default)]
    pub enabled: bool,

    /// API key for the remote context store. Required when enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override the remote store base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Per-call cutoff in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Reserved for a future retry policy.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Reserved for a future retry policy.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5_000
}
fn default_retry_attempts() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            endpoint: None,
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for RecallConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecallConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &redact(&self.api_key))
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

impl RecallConfig {
    /// Load configuration from the default path (~/.memoir/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `MEMOIR_API_KEY`
    /// - `MEMOIR_ENDPOINT`
    /// - `MEMOIR_ENABLED` ("true"/"false")
    /// - `MEMOIR_TIMEOUT_MS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(key) = std::env::var("MEMOIR_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(endpoint) = std::env::var("MEMOIR_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }
        if let Ok(enabled) = std::env::var("MEMOIR_ENABLED") {
            config.enabled = enabled.eq_ignore_ascii_case("true") || enabled == "1";
        }
        if let Ok(timeout) = std::env::var("MEMOIR_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                config.timeout_ms = ms;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".memoir")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.api_key.is_none() {
            return Err(ConfigError::ValidationError(
                "api_key is required when enabled = true".into(),
            ));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_disabled_and_valid() {
        let config = RecallConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.timeout_ms, 5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = RecallConfig {
            enabled: true,
            api_key: Some("mk_test".into()),
            ..RecallConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RecallConfig = toml::from_str(&toml_str).unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.api_key.as_deref(), Some("mk_test"));
        assert_eq!(parsed.timeout_ms, config.timeout_ms);
    }

    #[test]
    fn enabled_without_api_key_rejected() {
        let config = RecallConfig {
            enabled: true,
            ..RecallConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = RecallConfig {
            timeout_ms: 0,
            ..RecallConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = RecallConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert!(!result.unwrap().enabled);
    }

    #[test]
    fn invalid_file_content_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enabled = \"definitely\"").unwrap();

        let result = RecallConfig::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn file_failing_validation_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enabled = true").unwrap();

        let result = RecallConfig::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn file_with_key_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enabled = true\napi_key = \"mk_live_1\"\ntimeout_ms = 2500").unwrap();

        let config = RecallConfig::load_from(file.path()).unwrap();
        assert!(config.enabled);
        assert_eq!(config.timeout_ms, 2_500);
        assert!(config.has_api_key());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = RecallConfig {
            api_key: Some("mk_secret".into()),
            ..RecallConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("mk_secret"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = RecallConfig::default_toml();
        assert!(toml_str.contains("enabled = false"));
        assert!(toml_str.contains("timeout_ms = 5000"));
    }
}
