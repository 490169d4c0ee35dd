//! Axum router configuration with middleware.
//!
//! Routes:
//! - POST /hash, GET /hash/{id}
//! - GET /stats
//! - POST /shutdown
//! - GET /health
//!
//! Middleware: CORS, tracing. Wrong methods on known paths answer 405.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/hash", post(handlers::hash::submit_hash))
        .route("/hash/{id}", get(handlers::hash::get_hash))
        .route("/stats", get(handlers::stats::get_stats))
        .route("/shutdown", post(handlers::shutdown::request_shutdown))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness plus lifecycle phase.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "phase": state.hash_service.phase().to_string(),
        "mode": state.mode.to_string(),
        "entries": state.hash_service.entry_count(),
    }))
}
