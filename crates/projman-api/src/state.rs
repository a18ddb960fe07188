//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The requirement store is created here, once per application instance,
//! and never as a global. Tests build as many isolated instances as they
//! need.

use projman_core::RequirementStore;
use thiserror::Error;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `LOG_FORMAT`: `text` or `json` (default: `text`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            None => defaults.port,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
        };

        let log_format = match lookup("LOG_FORMAT").filter(|v| !v.is_empty()) {
            None => defaults.log_format,
            Some(raw) => match raw.to_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidLogFormat(raw)),
            },
        };

        Ok(Self { port, log_format })
    }
}

/// Invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be an integer between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("LOG_FORMAT must be \"text\" or \"json\", got {0:?}")]
    InvalidLogFormat(String),
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the store is an `Arc` handle, so clones see the same data.
/// [`AppConfig`] is consumed at startup by the binary and is not carried here.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: RequirementStore,
}

impl AppState {
    /// Create a new application state with an empty store.
    pub fn new() -> Self {
        Self {
            store: RequirementStore::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
