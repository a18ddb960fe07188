//! Registry client error types.

/// Errors from registry calls.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Registry returned a non-2xx status.
    #[error("registry {endpoint} returned {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },
}
