//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hashery_types::error::HashError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the hash service.
    Hash(HashError),
    /// Malformed request input.
    Validation(String),
}

impl From<HashError> for AppError {
    fn from(e: HashError) -> Self {
        AppError::Hash(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Hash(HashError::EmptySecret) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Secret must not be empty".to_string())
            }
            AppError::Hash(HashError::NotFound) => {
                (StatusCode::NOT_FOUND, "HASH_NOT_FOUND", "Hash not found".to_string())
            }
            AppError::Hash(HashError::ShuttingDown) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SHUTTING_DOWN", "Service is shutting down".to_string())
            }
            AppError::Hash(e @ HashError::Abandoned(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SHUTTING_DOWN", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::warn!(%status, code, %message, "request failed");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
