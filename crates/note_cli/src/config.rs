//! CLI settings.
//!
//! Settings are read from an optional TOML file, then overridden by
//! `SPNOTE_*` environment variables and validated.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Output format of `spnote simulate`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Chart data as JSON
    Json,
    /// Event table
    #[default]
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(format!("Invalid output_format '{}'. Valid values: json, table", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Highest supported percentage precision.
pub const MAX_PERCENT_PRECISION: usize = 6;

/// CLI settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Default output format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Decimals in rendered percentages
    #[serde(default = "default_percent_precision")]
    pub percent_precision: usize,

    /// Log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_percent_precision() -> usize {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            percent_precision: default_percent_precision(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(format) = var("SPNOTE_OUTPUT_FORMAT") {
            match format.parse() {
                Ok(format) => self.output_format = format,
                Err(message) => errors.push(message),
            }
        }

        if let Some(precision) = var("SPNOTE_PERCENT_PRECISION") {
            match precision.trim().parse() {
                Ok(precision) => self.percent_precision = precision,
                Err(_) => errors.push(format!(
                    "Invalid SPNOTE_PERCENT_PRECISION '{}'. Must be a non-negative integer",
                    precision
                )),
            }
        }

        if let Some(log_level) = var("SPNOTE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.percent_precision > MAX_PERCENT_PRECISION {
            errors.push(format!(
                "percent_precision {} exceeds maximum allowed ({})",
                self.percent_precision, MAX_PERCENT_PRECISION
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (if present) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
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
