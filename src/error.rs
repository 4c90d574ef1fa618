//! Error types for reqcollector
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for reqcollector operations
///
/// Only configuration, credential and precondition failures are meant to
/// reach the user as hard errors. Provider failures are absorbed by the
/// session and turned into a placeholder reply.
#[derive(Error, Debug)]
pub enum ReqCollectorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Provider-related errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// An operation was requested before the session could satisfy it
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A requirements record mutation was rejected
    #[error("Cannot update {field}: {reason}")]
    Record {
        /// Key of the field being updated
        field: String,
        /// Why the update was rejected
        reason: String,
    },

    /// Field name is not part of the requirements record
    #[error("Unknown requirements field: {0}")]
    UnknownField(String),

    /// Writing an exported document failed
    #[error("Export error: {0}")]
    Export(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for reqcollector operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation. Callers that
/// need the category downcast to [`ReqCollectorError`].
pub type Result<T> = anyhow::Result<T>;
