//! Deferred, exactly-once completion of reserved entries.
//!
//! Each submission gets its own tokio task: hash the secret, sleep until
//! `submitted_at + min_delay`, write the digest into the [`Registry`], then
//! record the end-to-end latency. The window is measured from submission so
//! time spent in request handling counts toward the minimum.
//!
//! Tasks are tracked so shutdown can wait for them, and abandon their write
//! once the coordinator's stop token fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use hashery_types::entry::EntryId;
use hashery_types::error::HashError;

use crate::digest::SecretDigest;
use crate::registry::Registry;
use crate::stats::StatsAggregator;

/// Handle to a scheduled completion.
///
/// Dropping it detaches the task; the completion still runs.
#[derive(Debug)]
pub struct Completion {
    id: EntryId,
    handle: JoinHandle<Option<String>>,
}

impl Completion {
    /// Identifier reserved for this submission.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Wait for the digest to be written.
    pub async fn wait(self) -> Result<String, HashError> {
        match self.handle.await {
            Ok(Some(digest)) => Ok(digest),
            Ok(None) => Err(HashError::Abandoned(self.id)),
            Err(e) => {
                tracing::error!(id = %self.id, error = %e, "completion task failed");
                Err(HashError::Abandoned(self.id))
            }
        }
    }
}

/// Spawns completion tasks that share a registry and stats aggregator.
pub struct CompletionScheduler<D: SecretDigest> {
    digest: Arc<D>,
    registry: Arc<Registry>,
    stats: Arc<StatsAggregator>,
    min_delay: Duration,
    tracker: TaskTracker,
    stop: CancellationToken,
}

impl<D: SecretDigest> CompletionScheduler<D> {
    pub fn new(
        digest: D,
        registry: Arc<Registry>,
        stats: Arc<StatsAggregator>,
        min_delay: Duration,
        stop: CancellationToken,
    ) -> Self {
        Self {
            digest: Arc::new(digest),
            registry,
            stats,
            min_delay,
            tracker: TaskTracker::new(),
            stop,
        }
    }

    /// Tracker holding every spawned completion.
    pub fn tracker(&self) -> &TaskTracker {
        &self.tracker
    }

    /// Schedule the completion of `id`.
    ///
    /// `id` must come from [`Registry::reserve`] and be scheduled at most once;
    /// this task is its only writer.
    pub fn schedule(&self, id: EntryId, secret: String, submitted_at: Instant) -> Completion {
        let digest = Arc::clone(&self.digest);
        let registry = Arc::clone(&self.registry);
        let stats = Arc::clone(&self.stats);
        let stop = self.stop.clone();
        let deadline = submitted_at + self.min_delay;

        let handle = self.tracker.spawn(async move {
            let value = digest.digest(&secret);
            drop(secret);

            tokio::select! {
                _ = stop.cancelled() => {
                    tracing::debug!(%id, "service stopped, abandoning completion");
                    return None;
                }
                _ = tokio::time::sleep_until(deadline) => {}
            }

            registry.complete(id, value.clone());
            let latency = submitted_at.elapsed();
            stats.record_completion(latency);
            tracing::debug!(%id, latency_ms = latency.as_millis() as u64, "completion written");

            Some(value)
        });

        Completion { id, handle }
    }
}
