//! CLI error types.

use std::path::PathBuf;

use note_core::market_data::MarketDataError;
use note_models::instruments::ConfigurationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures of the `spnote` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File extension not supported for this input.
    #[error("Unsupported {kind} file format: {path} (expected {expected})")]
    UnsupportedFormat {
        /// What was being loaded
        kind: &'static str,
        /// Offending path
        path: PathBuf,
        /// Accepted extensions
        expected: &'static str,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File involved
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Invalid product definition.
    #[error("Invalid product definition: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Invalid asset data.
    #[error("Invalid asset data: {0}")]
    MarketData(#[from] MarketDataError),

    /// Invalid CLI settings.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Result serialisation failed.
    #[error("Failed to serialise output: {0}")]
    Serialisation(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CliError::UnsupportedFormat {
            kind: "asset",
            path: PathBuf::from("prices.xlsx"),
            expected: "csv or json",
        };
        assert_eq!(
            err.to_string(),
            "Unsupported asset file format: prices.xlsx (expected csv or json)"
        );

        let err = CliError::from(ConfigurationError::UnknownCurrency("XXX".to_string()));
        assert_eq!(err.to_string(), "Invalid product definition: Unknown currency: XXX");
    }
}
