//! # projman-api -- Axum API Service
//!
//! HTTP surface for projman: requirements and their sub-items, held in an
//! in-memory store for the lifetime of the process.
//!
//! ## Routes
//!
//! - `/health`: liveness, any method, plain-text `OK`
//! - `/requirements` and everything below it: see [`routes::dispatch`]
//!
//! Requirement traffic is not registered route by route. A single fallback
//! handler classifies `(method, path)` and runs the matching operation, so
//! 404 / 405 / malformed-path answers follow one set of rules.
//!
//! ## Middleware Stack (Tower)
//!
//! TraceLayer → DefaultBodyLimit → Handler

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod registry;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::Router;

/// Request bodies above this size are rejected with 413 before decoding.
const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Build the complete Axum application.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", any(liveness))
        .fallback(routes::dispatch::dispatch)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// /health: Liveness probe. Answers every method.
async fn liveness() -> &'static str {
    "OK"
}
