//! Error types for photo-pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! At the repository boundary these collapse into a plain message
//! (see [`crate::types::ApiResult`]).

use thiserror::Error;

/// Fallback message for errors that carry no text
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The main error type for photo-pager
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

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("No data found")]
    EmptyBody,

    // ============================================================================
    // Paging Errors
    // ============================================================================
    #[error("Paging error: {message}")]
    Paging { message: String },

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

/// Coarse classification of a failed page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response
    NetworkFailure,
    /// The server answered with a non-success status
    HttpFailure,
    /// Success status but nothing to read
    EmptyBody,
    /// Anything else (config, decode, I/O)
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid value error
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

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a paging error
    pub fn paging(message: impl Into<String>) -> Self {
        Self::Paging {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(e) if e.status().is_some() => ErrorKind::HttpFailure,
            Error::Http(_) => ErrorKind::NetworkFailure,
            Error::HttpStatus { .. } => ErrorKind::HttpFailure,
            Error::EmptyBody => ErrorKind::EmptyBody,
            _ => ErrorKind::Other,
        }
    }

    /// Message used when this error crosses the repository boundary
    ///
    /// Carries the underlying cause's own text rather than this crate's
    /// framing. A failure status yields its error body, or `HTTP <status>`
    /// when the body is blank. Errors without any text map to
    /// [`UNKNOWN_ERROR`].
    pub fn message(&self) -> String {
        let message = match self {
            Error::Http(e) => e.to_string(),
            Error::HttpStatus { status, body } if body.trim().is_empty() => {
                format!("HTTP {status}")
            }
            Error::HttpStatus { body, .. } => body.clone(),
            Error::Decode { message } | Error::Paging { message } | Error::Other(message) => {
                message.clone()
            }
            _ => self.to_string(),
        };
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

/// Result type alias for photo-pager
pub type Result<T> = std::result::Result<T, Error>;
