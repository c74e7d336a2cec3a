//! Core error types for pomotask-core.
//!
//! Every fallible operation in the library surfaces one of these variants;
//! callers are expected to display the message and leave prior state alone.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomotask-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Task API client errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Task store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store file
    #[error("Failed to open task store at {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Failed to persist the store file
    #[error("Failed to save task store: {0}")]
    SaveFailed(String),

    /// No task with the requested id
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Rejected task payload
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Task API client errors.
///
/// A single generic kind per failed call; the message is what the UI shows.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, body decode)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("{operation} failed: HTTP {status}")]
    Status { operation: &'static str, status: u16 },

    /// Malformed base URL
    #[error("Invalid API base URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Blank or whitespace-only title
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Title over the length limit
    #[error("Task title must be at most {max} characters (got {len})")]
    TitleTooLong { len: usize, max: usize },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
