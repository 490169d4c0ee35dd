//! Process-wide completion counters.
//!
//! Two independent `AtomicU64`s track the completed count and the cumulative
//! latency in nanoseconds. A snapshot may read them at slightly different
//! moments; the derived average tolerates that.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hashery_types::stats::StatsSnapshot;

/// Lock-free aggregate of completed computations.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    completed: AtomicU64,
    cumulative_nanos: AtomicU64,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one completion that took `latency` end to end.
    pub fn record_completion(&self, latency: Duration) {
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
        self.cumulative_nanos.fetch_add(nanos, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    /// Current totals with the average in whole milliseconds.
    pub fn snapshot(&self) -> StatsSnapshot {
        let count = self.completed.load(Ordering::SeqCst);
        let nanos = self.cumulative_nanos.load(Ordering::SeqCst);
        StatsSnapshot::from_counters(count, nanos)
    }
}
