//! Aggregate timing statistics reported by `GET /stats`.

use serde::{Deserialize, Serialize};

/// Point-in-time view of the completion counters.
///
/// `average` is the mean end-to-end latency in whole milliseconds
/// (truncated), or zero when nothing has completed yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Number of completed computations.
    pub total: u64,
    /// Mean latency in milliseconds.
    pub average: u64,
}

impl StatsSnapshot {
    /// Derive a snapshot from raw counters.
    pub fn from_counters(count: u64, cumulative_nanos: u64) -> Self {
        if count == 0 {
            return Self::default();
        }
        Self {
            total: count,
            average: (cumulative_nanos / count) / 1_000_000,
        }
    }
}
