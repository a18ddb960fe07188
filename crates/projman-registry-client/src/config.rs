//! Registry client configuration.
//!
//! Defaults target a registry on the local host. Override via environment
//! variables or explicit construction for deployment and tests.

use url::Url;

/// Default registry base URL when `SERVICE_REGISTRY_URL` is unset.
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:8085/api/registry";

/// Configuration for announcing this service to the registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL. Registration POSTs go to `{registry_url}/register`.
    pub registry_url: Url,
    /// Host name other services should use to reach this one.
    pub service_host: String,
    /// Port this service listens on.
    pub port: u16,
    /// Seconds between re-registrations.
    pub heartbeat_secs: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SERVICE_REGISTRY_URL` (default: `http://localhost:8085/api/registry`)
    /// - `SERVICE_HOST` (default: `localhost`)
    /// - `REGISTRY_HEARTBEAT_SECS` (default: 30, must be non-zero)
    /// - `REGISTRY_TIMEOUT_SECS` (default: 10)
    pub fn from_env(port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(port, |var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(
        port: u16,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let raw_url = lookup("SERVICE_REGISTRY_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        let registry_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidUrl("SERVICE_REGISTRY_URL".to_string(), e.to_string())
        })?;

        let service_host = lookup("SERVICE_HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "localhost".to_string());

        let heartbeat_secs = parse_secs(&lookup, "REGISTRY_HEARTBEAT_SECS", 30)?;
        if heartbeat_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "REGISTRY_HEARTBEAT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            registry_url,
            service_host,
            port,
            heartbeat_secs,
            timeout_secs: parse_secs(&lookup, "REGISTRY_TIMEOUT_SECS", 10)?,
        })
    }

    /// The externally reachable base URL of this service.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.service_host, self.port)
    }

    /// Full URL registrations are POSTed to.
    pub fn register_url(&self) -> String {
        format!(
            "{}/register",
            self.registry_url.as_str().trim_end_matches('/')
        )
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(var).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue(var.to_string(), e.to_string())
            }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
