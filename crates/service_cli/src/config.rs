//! Sweep configuration management.
//!
//! Handles loading of contract terms and input settings from TOML files
//! with environment variable and command-line override support.

use serde::Deserialize;
use snowball_models::instruments::{ContractError, ContractTerms};
use snowball_models::sweep::DEFAULT_PARALLEL_THRESHOLD;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Sweep configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SweepConfig {
    /// Contract life in months
    #[serde(default = "default_tenure")]
    pub tenure: u32,

    /// Months before the first observation
    #[serde(default = "default_lock_in_period")]
    pub lock_in_period: u32,

    /// Knock-out barrier as a fraction of the start price
    #[serde(default = "default_upper_ratio")]
    pub upper_ratio: f64,

    /// Knock-in barrier as a fraction of the start price
    #[serde(default = "default_lower_ratio")]
    pub lower_ratio: f64,

    /// Row count at which the sweep runs on rayon
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Name of the date column in the input CSV
    #[serde(default = "default_date_column")]
    pub date_column: String,

    /// Name of the price column in the input CSV
    #[serde(default = "default_price_column")]
    pub price_column: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_tenure() -> u32 {
    ContractTerms::default().tenure()
}

fn default_lock_in_period() -> u32 {
    ContractTerms::default().lock_in_period()
}

fn default_upper_ratio() -> f64 {
    ContractTerms::default().upper_ratio()
}

fn default_lower_ratio() -> f64 {
    ContractTerms::default().lower_ratio()
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

fn default_date_column() -> String {
    "date".to_string()
}

fn default_price_column() -> String {
    "price".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            tenure: default_tenure(),
            lock_in_period: default_lock_in_period(),
            upper_ratio: default_upper_ratio(),
            lower_ratio: default_lower_ratio(),
            parallel_threshold: default_parallel_threshold(),
            date_column: default_date_column(),
            price_column: default_price_column(),
            log_level: default_log_level(),
        }
    }
}

/// Contract term overrides supplied on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TermOverrides {
    /// `--tenure`
    pub tenure: Option<u32>,
    /// `--lock-in`
    pub lock_in_period: Option<u32>,
    /// `--upper-ratio`
    pub upper_ratio: Option<f64>,
    /// `--lower-ratio`
    pub lower_ratio: Option<f64>,
}

impl SweepConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Some(tenure) = env_parse("SNOWBALL_TENURE") {
            self.tenure = tenure;
        }

        if let Some(lock_in) = env_parse("SNOWBALL_LOCK_IN") {
            self.lock_in_period = lock_in;
        }

        if let Some(upper) = env_parse("SNOWBALL_UPPER_RATIO") {
            self.upper_ratio = upper;
        }

        if let Some(lower) = env_parse("SNOWBALL_LOWER_RATIO") {
            self.lower_ratio = lower;
        }

        if let Ok(log_level) = std::env::var("SNOWBALL_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Apply command-line overrides, which take precedence over file and environment
    pub fn with_overrides(mut self, overrides: &TermOverrides) -> Self {
        if let Some(tenure) = overrides.tenure {
            self.tenure = tenure;
        }
        if let Some(lock_in) = overrides.lock_in_period {
            self.lock_in_period = lock_in;
        }
        if let Some(upper) = overrides.upper_ratio {
            self.upper_ratio = upper;
        }
        if let Some(lower) = overrides.lower_ratio {
            self.lower_ratio = lower;
        }
        self
    }

    /// Build validated contract terms
    pub fn contract_terms(&self) -> Result<ContractTerms, ContractError> {
        ContractTerms::new(
            self.tenure,
            self.lock_in_period,
            self.upper_ratio,
            self.lower_ratio,
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        // Contract terms
        if let Err(e) = self.contract_terms() {
            errors.push(e.to_string());
        }

        // Input columns
        if self.date_column.trim().is_empty() {
            errors.push("date_column cannot be empty".to_string());
        }
        if self.price_column.trim().is_empty() {
            errors.push("price_column cannot be empty".to_string());
        }
        if self.date_column == self.price_column {
            errors.push(format!(
                "date_column and price_column are both '{}'",
                self.date_column
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Reads and parses an environment variable, ignoring unparsable values.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.tenure, 24);
        assert_eq!(config.lock_in_period, 3);
        assert_eq!(config.upper_ratio, 1.0);
        assert_eq!(config.lower_ratio, 0.8);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(config.date_column, "date");
        assert_eq!(config.price_column, "price");
    }

    #[test]
    fn test_default_config_validates() {
        let config = SweepConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.contract_terms().unwrap(), ContractTerms::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SweepConfig::from_toml(
            r#"
            tenure = 12
            price_column = "close"
            "#,
        )
        .unwrap();
        assert_eq!(config.tenure, 12);
        assert_eq!(config.price_column, "close");
        assert_eq!(config.lock_in_period, 3);
        assert_eq!(config.date_column, "date");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = SweepConfig::from_toml("tenure = \"long\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lock_in_period = 6\nupper_ratio = 1.05").unwrap();

        let config = SweepConfig::load(file.path()).unwrap();
        assert_eq!(config.lock_in_period, 6);
        assert_eq!(config.upper_ratio, 1.05);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SweepConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, SweepConfig::default());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("SNOWBALL_LOWER_RATIO", "0.7");
        let config = SweepConfig::default().with_env_override();
        assert_eq!(config.lower_ratio, 0.7);
        std::env::remove_var("SNOWBALL_LOWER_RATIO");
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let overrides = TermOverrides {
            tenure: Some(36),
            upper_ratio: Some(1.1),
            ..TermOverrides::default()
        };
        let config = SweepConfig::default().with_overrides(&overrides);
        assert_eq!(config.tenure, 36);
        assert_eq!(config.upper_ratio, 1.1);
        assert_eq!(config.lock_in_period, 3);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = SweepConfig::default();
        config.log_level = "chatty".to_string();

        let result = config.validate();
        assert!(result.is_err());

        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("log_level")));
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_validate_tenure_shorter_than_lock_in() {
        let mut config = SweepConfig::default();
        config.tenure = 2;

        if let Err(ConfigError::Validation(errors)) = config.validate() {
            assert!(errors.iter().any(|e| e.contains("tenure")));
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = SweepConfig::default();
        config.log_level = "invalid".to_string();
        config.lock_in_period = 0;
        config.lower_ratio = 1.5;
        config.price_column = String::new();

        let result = config.validate();
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.len() >= 3, "Expected at least 3 validation errors");
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_validate_reports_contract_error_text() {
        let mut config = SweepConfig::default();
        config.upper_ratio = 0.9;
        config.lower_ratio = 0.95;

        let expected = config.contract_terms().unwrap_err().to_string();
        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors, vec![expected]),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
