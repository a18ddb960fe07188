//! # Registry Heartbeat Startup
//!
//! The service announces itself to the registry, but CRUD traffic never
//! depends on it. Invalid registry settings are logged and the heartbeat is
//! skipped; the HTTP server starts either way.

use std::time::Duration;

use projman_registry_client::{Heartbeat, RegistryClient, RegistryConfig, ServiceRegistration};

/// Start the registry heartbeat for a service listening on `port`.
///
/// Returns `None` when the registry configuration or client cannot be
/// built. Must be called inside a tokio runtime.
pub fn start_heartbeat(port: u16, lookup: impl Fn(&str) -> Option<String>) -> Option<Heartbeat> {
    let config = match RegistryConfig::from_lookup(port, lookup) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Registry configuration invalid, heartbeat disabled: {e}");
            return None;
        }
    };

    let client = match RegistryClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create registry client, heartbeat disabled: {e}");
            return None;
        }
    };

    tracing::info!(
        registry = %config.register_url(),
        interval_secs = config.heartbeat_secs,
        "starting registry heartbeat"
    );
    Some(Heartbeat::spawn(
        client,
        ServiceRegistration::projman(&config),
        Duration::from_secs(config.heartbeat_secs),
    ))
}
