//! Core error types for pomolog-core.
//!
//! The timer itself never fails; everything here comes from the task log
//! transport, configuration on disk, or an observer that chose to report
//! a problem.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomolog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport failure talking to the task log endpoint
    #[error("Task log request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed task log base URL
    #[error("Invalid task log URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tick observer reported a failure
    #[error("Observer '{observer}' failed: {message}")]
    Observer { observer: String, message: String },
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

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not resolve the configuration directory
    #[error("Cannot resolve configuration directory: {0}")]
    NoConfigDir(String),
}

impl CoreError {
    pub fn observer(observer: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Observer {
            observer: observer.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
