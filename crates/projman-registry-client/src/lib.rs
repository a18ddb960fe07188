//! # projman-registry-client -- Service registry client
//!
//! The projman service announces itself to an external registry so other
//! services can discover it. This crate owns that boundary:
//!
//! - [`RegistryClient`] sends a single [`ServiceRegistration`] per call.
//! - [`Heartbeat`] repeats the registration on a fixed interval in a
//!   background task until it is shut down.
//!
//! Registration failures are never fatal and never retried immediately. The
//! next heartbeat tick is the retry.

pub mod config;
pub mod error;
pub mod heartbeat;
pub mod types;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use heartbeat::Heartbeat;
pub use types::ServiceRegistration;

use std::time::Duration;

/// Client for the registry's `register` endpoint.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    register_url: String,
}

impl RegistryClient {
    /// Create a client from configuration.
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RegistryError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            register_url: config.register_url(),
        })
    }

    /// POST `registration` to the registry.
    ///
    /// Returns the registry's response body on a 2xx status.
    pub async fn register(
        &self,
        registration: &ServiceRegistration,
    ) -> Result<String, RegistryError> {
        let endpoint = "POST /register";

        let resp = self
            .http
            .post(&self.register_url)
            .json(registration)
            .send()
            .await
            .map_err(|e| RegistryError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(RegistryError::Rejected {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
