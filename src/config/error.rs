//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set (or was blank).
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The vector format name is not one of `text` / `binary`.
    #[error("unknown vector format '{value}': expected 'text' or 'binary'")]
    UnknownVectorFormat { value: String },

    /// The record store base URL is not an http(s) URL.
    #[error("invalid API base URL '{value}': must start with http:// or https://")]
    InvalidBaseUrl { value: String },

    /// HTTP timeout of zero would fail every request.
    #[error("HTTP timeout must be greater than zero")]
    ZeroTimeout,

    /// A pacing interval of zero would disable rate limiting against the store.
    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
