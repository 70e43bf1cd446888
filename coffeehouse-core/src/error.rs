/// Structured error types for coffeehouse-core.
///
/// The CLI wraps these in `anyhow` for context; library consumers match on
/// the variants directly.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for coffeehouse-core operations
#[derive(Error, Debug)]
pub enum CoffeeError {
    /// Store unreachable, rejected credentials, malformed query or missing tables
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Connection URL could not be parsed or could not carry credentials
    #[error("Invalid database URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Config file unreadable or required setting missing
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Config file is not valid TOML
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Result type alias for coffeehouse-core operations
pub type Result<T> = std::result::Result<T, CoffeeError>;

impl CoffeeError {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoffeeError::invalid_url("nope", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Invalid database URL 'nope': relative URL without a base"
        );

        let err = CoffeeError::config("database_url is not set");
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: CoffeeError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, CoffeeError::Database(_)));
    }
}
