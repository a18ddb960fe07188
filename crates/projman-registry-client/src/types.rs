//! Registration payload sent to the service registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;

/// Name this service registers under.
pub const SERVICE_NAME: &str = "projman-service";

/// Operation names advertised to the registry.
pub const OPERATIONS: &[&str] = &[
    "getRequirements",
    "createRequirement",
    "updateRequirement",
    "deleteRequirement",
    "addSubItem",
    "updateSubItem",
    "deleteSubItem",
];

/// Self-description POSTed to `{registry}/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegistration {
    pub service_name: String,
    pub operations: Vec<String>,
    pub endpoint: String,
    pub health_check: String,
    pub metadata: BTreeMap<String, String>,
    pub framework: String,
    pub version: String,
    pub port: u16,
}

impl ServiceRegistration {
    /// The projman service's registration for the given configuration.
    pub fn projman(config: &RegistryConfig) -> Self {
        let endpoint = config.endpoint();
        let metadata = BTreeMap::from([
            ("type".to_string(), "requirements-status-service".to_string()),
            ("language".to_string(), "rust".to_string()),
        ]);

        Self {
            service_name: SERVICE_NAME.to_string(),
            operations: OPERATIONS.iter().map(|op| op.to_string()).collect(),
            health_check: format!("{endpoint}/health"),
            endpoint,
            metadata,
            framework: "axum".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            port: config.port,
        }
    }
}
