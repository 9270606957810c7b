//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the player search engine, covering
//! configuration, ingestion, and serialization failures.
//!
//! ## Error Categories
//! Ingestion distinguishes two failure classes: structural row errors
//! (wrong field count, unknown record reference) are skipped by the
//! pipeline and never surface here; content errors (an unparseable numeric
//! score) are fatal for the ingesting stream and carried by
//! [`CatalogError::InvalidScore`] together with the stream name and the
//! offending raw line.

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error types for the player search engine
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// A structurally valid row carried a score that is not a number.
    /// Fatal for the stream; there is no partial resume.
    #[error("invalid numeric score in {stream} stream: {line:?}")]
    InvalidScore { stream: String, line: String },

    /// Serialization/deserialization errors
    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },
}

impl CatalogError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            CatalogError::Io(_) => "io",
            CatalogError::Config { .. } | CatalogError::ValidationFailed { .. } => "configuration",
            CatalogError::InvalidScore { .. } => "ingestion",
            CatalogError::SerializationFailed { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationFailed {
            message: format!("JSON serialization error: {}", err),
        }
    }
}
