//! Completion statistics endpoint.
//!
//! GET /stats - Number of completed hashes and their mean latency.

use axum::Json;
use axum::extract::State;

use hashery_types::stats::StatsSnapshot;

use crate::state::AppState;

/// GET /stats - `{"total": <count>, "average": <milliseconds>}`.
///
/// Both values are zero before the first completion.
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.hash_service.stats())
}
