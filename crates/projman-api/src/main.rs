//! # projman-api -- Binary Entry Point
//!
//! Starts the Axum HTTP server and the registry heartbeat.
//! Binds to configurable port (default 8080).

use projman_api::registry;
use projman_api::state::{AppConfig, AppState, LogFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let port = config.port;

    // Registry announcements run beside the server and never block startup.
    let heartbeat = registry::start_heartbeat(port, |var| std::env::var(var).ok());

    let app = projman_api::app(AppState::new());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("projman API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    if let Some(heartbeat) = heartbeat {
        heartbeat.shutdown().await;
    }
    tracing::info!("projman API stopped");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable, waiting for Ctrl-C only: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received");
}
