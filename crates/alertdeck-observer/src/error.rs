//! Error types for the API server.
//!
//! [`ObserverError`] covers every way a request can be rejected and
//! converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The ingest body was empty or not a valid alert payload.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The ingest route was called with a method other than `POST`.
    #[error("method {0} not allowed, POST required")]
    MethodNotAllowed(String),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::InvalidBody(_) => "Please send a valid request body",
            Self::MethodNotAllowed(_) => "Please send with post http method",
        };
        let status = StatusCode::BAD_REQUEST;

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
