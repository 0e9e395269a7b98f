//! Host configuration management.
//!
//! Loads [`FrameConfig`] from TOML with environment variable overrides:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `OCC_CENTURY_PIVOT` | `century_pivot` |
//! | `OCC_LOG_LEVEL` | `log_level` |
//!
//! ```toml
//! century_pivot = 69
//! log_level = "debug"
//! ```

use std::path::Path;

use occ_core::codec::{OccCodec, DEFAULT_CENTURY_PIVOT};
use serde::Deserialize;
use thiserror::Error;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation errors, all collected
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameConfig {
    /// Smallest two-digit year mapped to the 1900s
    #[serde(default = "default_century_pivot")]
    pub century_pivot: u8,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_century_pivot() -> u8 {
    DEFAULT_CENTURY_PIVOT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            century_pivot: default_century_pivot(),
            log_level: default_log_level(),
        }
    }
}

impl FrameConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// An unparsable `OCC_CENTURY_PIVOT` is ignored with a warning.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(pivot) = std::env::var("OCC_CENTURY_PIVOT") {
            match pivot.parse() {
                Ok(pivot) => self.century_pivot = pivot,
                Err(_) => tracing::warn!(value = %pivot, "Ignoring invalid OCC_CENTURY_PIVOT"),
            }
        }

        if let Ok(log_level) = std::env::var("OCC_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.century_pivot > 99 {
            errors.push(format!(
                "century_pivot {} must be between 0 and 99",
                self.century_pivot
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Codec configured with this century pivot
    pub fn codec(&self) -> Result<OccCodec, ConfigError> {
        OccCodec::with_century_pivot(self.century_pivot).ok_or_else(|| {
            ConfigError::Validation(vec![format!(
                "century_pivot {} must be between 0 and 99",
                self.century_pivot
            )])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FrameConfig::default();
        assert_eq!(config.century_pivot, 69);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
        assert_eq!(config.codec().unwrap(), OccCodec::new());
    }

    #[test]
    fn test_from_toml_str() {
        let config = FrameConfig::from_toml_str("century_pivot = 50\nlog_level = \"debug\"").unwrap();
        assert_eq!(config.century_pivot, 50);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.codec().unwrap().year_window(), (1950, 2049));
    }

    #[test]
    fn test_from_toml_str_defaults() {
        let config = FrameConfig::from_toml_str("").unwrap();
        assert_eq!(config, FrameConfig::default());
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_field() {
        let result = FrameConfig::from_toml_str("pivot = 50");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_collects_errors() {
        let config = FrameConfig {
            century_pivot: 150,
            log_level: "loud".to_string(),
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("century_pivot"));
                assert!(errors[1].contains("log_level"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert!(config.codec().is_err());
    }

    #[test]
    fn test_validate_log_levels_case_insensitive() {
        for level in &["trace", "DEBUG", "Info", "warn", "error"] {
            let config = FrameConfig {
                log_level: level.to_string(),
                ..FrameConfig::default()
            };
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "century_pivot = 70").unwrap();

        let config = FrameConfig::load(file.path()).unwrap();
        assert_eq!(config.century_pivot, 70);
    }

    #[test]
    fn test_load_missing_file() {
        let result = FrameConfig::load(Path::new("/nonexistent/occ.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("OCC_CENTURY_PIVOT", "40");
        std::env::set_var("OCC_LOG_LEVEL", "warn");
        let config = FrameConfig::default().with_env_override();
        assert_eq!(config.century_pivot, 40);
        assert_eq!(config.log_level, "warn");

        std::env::set_var("OCC_CENTURY_PIVOT", "not-a-number");
        let config = FrameConfig::default().with_env_override();
        assert_eq!(config.century_pivot, 69);

        std::env::remove_var("OCC_CENTURY_PIVOT");
        std::env::remove_var("OCC_LOG_LEVEL");
    }
}
