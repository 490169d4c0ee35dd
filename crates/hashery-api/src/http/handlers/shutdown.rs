//! Shutdown trigger.
//!
//! POST /shutdown - Start draining, exactly as an OS termination signal would.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// POST /shutdown - Begin graceful shutdown and answer 204.
///
/// The server stops accepting connections once this response is written;
/// in-flight requests and completions get the configured grace period.
pub async fn request_shutdown(State(state): State<AppState>) -> StatusCode {
    tracing::info!("shutdown requested over HTTP");
    state.hash_service.request_shutdown();
    StatusCode::NO_CONTENT
}
