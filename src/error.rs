//! Error handling module for swarm-input
//!
//! Every failure the generator can hit maps onto one of these variants.
//! All of them are fatal: the run stops and no output file is left behind.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for swarm-input
#[derive(Error, Debug)]
pub enum SwarmError {
    /// Template file missing or unreadable
    #[error("Failed to read template {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template file is not valid JSON
    #[error("Failed to parse template {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Template lacks the `methods[..].centers` structure
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid sweep configuration (num, bounds, sweep file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output file could not be created, written or moved into place
    #[error("Failed to write output {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for swarm-input operations
pub type Result<T> = std::result::Result<T, SwarmError>;

impl SwarmError {
    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for both unreadable and unparseable templates
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SwarmError::config("num must be at least 1");
        assert_eq!(err.to_string(), "Configuration error: num must be at least 1");

        let err = SwarmError::schema("missing `methods`");
        assert_eq!(err.to_string(), "Schema error: missing `methods`");
    }

    #[test]
    fn test_load_and_parse_are_load_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SwarmError::Load {
            path: PathBuf::from("Template_Input.json"),
            source: io_err,
        };
        assert!(err.is_load_error());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SwarmError::Parse {
            path: PathBuf::from("Template_Input.json"),
            source: json_err,
        };
        assert!(err.is_load_error());

        assert!(!SwarmError::schema("x").is_load_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: SwarmError = json_err.into();
        assert!(matches!(err, SwarmError::Json(_)));
    }
}
