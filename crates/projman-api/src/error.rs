//! # API Error Types
//!
//! Every failure a handler can produce is one of three kinds, each surfaced
//! as an HTTP status with a plain-text body. Nothing is retried or recovered
//! below this point.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use projman_core::StoreError;
use thiserror::Error;

use crate::routes::dispatch::RouteError;

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed request body or malformed path shape (400).
    ///
    /// For body decode failures the message is the decoder's own text.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Referenced requirement or sub-item does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Known path, unsupported method (405).
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
}

impl AppError {
    /// The HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// The client-visible message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::MethodNotAllowed(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "request failed");
        (status, self.message().to_string()).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::MethodNotAllowed => Self::MethodNotAllowed(err.to_string()),
            RouteError::MalformedPath => Self::BadRequest(err.to_string()),
            RouteError::Unrouted => Self::NotFound(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn bad_request_status_code() {
        let status = AppError::BadRequest("EOF".into()).status();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_status_code() {
        let status = AppError::NotFound("req-1".into()).status();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn method_not_allowed_status_code() {
        let status = AppError::MethodNotAllowed("PATCH".into()).status();
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn store_errors_map_to_not_found() {
        let err = AppError::from(StoreError::RequirementNotFound("req-3".into()));
        assert_eq!(err, AppError::NotFound("requirement req-3 not found".into()));

        let err = AppError::from(StoreError::SubItemNotFound {
            requirement_id: "req-1".into(),
            sub_item_id: "sub-2".into(),
        });
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn route_errors_map_to_their_status() {
        let status = |e: RouteError| AppError::from(e).status();
        assert_eq!(status(RouteError::MethodNotAllowed), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(status(RouteError::MalformedPath), StatusCode::BAD_REQUEST);
        assert_eq!(status(RouteError::Unrouted), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn into_response_is_plain_text_message() {
        let response = AppError::BadRequest("unexpected end of input".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"), "got: {content_type}");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"unexpected end of input");
    }
}
