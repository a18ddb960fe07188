//! Periodic re-registration.
//!
//! The heartbeat registers once immediately, then once per interval. Each
//! attempt is a single request whose outcome is only logged. The task holds
//! nothing but the client and the payload; it shares no state with request
//! handling.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{RegistryClient, RegistryError, ServiceRegistration};

/// Handle to a running heartbeat task.
#[derive(Debug)]
pub struct Heartbeat {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Heartbeat {
    /// Spawn the heartbeat on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero. [`crate::RegistryConfig`] rejects a zero
    /// interval at load time.
    pub fn spawn(
        client: RegistryClient,
        registration: ServiceRegistration,
        interval: Duration,
    ) -> Self {
        let (shutdown, signal) = watch::channel(false);
        let task = tokio::spawn(run(client, registration, interval, signal));
        Self { shutdown, task }
    }

    /// Stop the heartbeat and wait for the task to exit.
    ///
    /// An attempt already in flight is allowed to finish (bounded by the
    /// client timeout).
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("registry heartbeat task ended abnormally: {e}");
        }
    }
}

async fn run(
    client: RegistryClient,
    registration: ServiceRegistration,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                register_once(&client, &registration).await;
            }
            _ = shutdown.changed() => {
                tracing::debug!("registry heartbeat stopped");
                break;
            }
        }
    }
}

/// Perform one registration attempt and log the outcome.
///
/// Returns whether the registry accepted the registration.
pub async fn register_once(client: &RegistryClient, registration: &ServiceRegistration) -> bool {
    match client.register(registration).await {
        Ok(body) => {
            tracing::info!(
                service = %registration.service_name,
                response = %body,
                "registered with service registry"
            );
            true
        }
        Err(RegistryError::Rejected { status, body, .. }) => {
            tracing::warn!(
                service = %registration.service_name,
                status,
                response = %body,
                "service registry rejected registration"
            );
            false
        }
        Err(e) => {
            tracing::warn!(
                service = %registration.service_name,
                error = %e,
                "failed to reach service registry"
            );
            false
        }
    }
}
