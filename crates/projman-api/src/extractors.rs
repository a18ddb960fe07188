//! # Body Decoding
//!
//! Request bodies are decoded from raw bytes rather than through
//! `axum::Json`, so a missing or non-JSON `Content-Type` is accepted and
//! the decoder's own error text reaches the client unchanged.

use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Decode a JSON body, mapping any failure to [`AppError::BadRequest`].
///
/// ```ignore
/// let req: Requirement = decode_json(body)?;
/// ```
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|err| AppError::BadRequest(err.to_string()))
}
