//! Error types for the character pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Page loads never retry. Every failure while loading a page collapses to
//! one of two kinds, [`ErrorKind::Network`] or [`ErrorKind::Parse`], which the
//! presentation layer renders as a single "could not load this page" state.

use std::sync::Arc;
use thiserror::Error;

/// The main error type for the character pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Network Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ============================================================================
    // Response Shape Errors
    // ============================================================================
    #[error("Unexpected response shape: {message}")]
    Parse { message: String },

    // ============================================================================
    // Cache Errors
    // ============================================================================
    /// An error observed through a request shared by several waiters
    #[error(transparent)]
    Shared(#[from] Arc<Error>),

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure or non-2xx response
    Network,
    /// Response body did not match the expected shape
    Parse,
    /// Bad configuration or input
    Config,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a response shape error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(_) | Error::HttpStatus { .. } => ErrorKind::Network,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Config { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::FileNotFound { .. } => ErrorKind::Config,
            Error::Shared(inner) => inner.kind(),
            Error::Json(_) | Error::Io(_) | Error::Other(_) => ErrorKind::Other,
        }
    }
}

/// Result type alias for the character pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::parse("missing field `info`");
        assert_eq!(
            err.to_string(),
            "Unexpected response shape: missing field `info`"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::http_status(500, "").kind(), ErrorKind::Network);
        assert_eq!(Error::parse("bad").kind(), ErrorKind::Parse);
        assert_eq!(Error::config("bad").kind(), ErrorKind::Config);
        assert_eq!(Error::Other("x".into()).kind(), ErrorKind::Other);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json_err).kind(), ErrorKind::Other);
    }

    #[test]
    fn test_shared_error_delegates() {
        let shared = Error::Shared(Arc::new(Error::http_status(503, "down")));
        assert_eq!(shared.kind(), ErrorKind::Network);
        assert_eq!(shared.to_string(), "HTTP 503: down");
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
