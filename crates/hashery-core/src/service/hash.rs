//! HashService: the operations the HTTP layer calls.
//!
//! Owns the registry, stats, scheduler, and shutdown coordinator for one
//! process. Generic over the digest so tests can plug in a cheap transform;
//! the binary pins it to the SHA-512/base64 adapter from hashery-infra.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use hashery_types::config::ServiceConfig;
use hashery_types::entry::{EntryId, EntryState};
use hashery_types::error::HashError;
use hashery_types::stats::StatsSnapshot;

use crate::digest::SecretDigest;
use crate::registry::Registry;
use crate::scheduler::{Completion, CompletionScheduler};
use crate::shutdown::{ShutdownCoordinator, ShutdownPhase};
use crate::stats::StatsAggregator;

/// Submission, retrieval, stats, and shutdown for the hashing service.
pub struct HashService<D: SecretDigest> {
    registry: Arc<Registry>,
    stats: Arc<StatsAggregator>,
    scheduler: CompletionScheduler<D>,
    shutdown: ShutdownCoordinator,
}

impl<D: SecretDigest> HashService<D> {
    /// Create a service with empty registry and stats.
    pub fn new(digest: D, min_delay: Duration) -> Self {
        let registry = Arc::new(Registry::new());
        let stats = Arc::new(StatsAggregator::new());
        let shutdown = ShutdownCoordinator::new();
        let scheduler = CompletionScheduler::new(
            digest,
            Arc::clone(&registry),
            Arc::clone(&stats),
            min_delay,
            shutdown.stop_token(),
        );

        Self {
            registry,
            stats,
            scheduler,
            shutdown,
        }
    }

    /// Create a service using the minimum delay from `config`.
    pub fn from_config(digest: D, config: &ServiceConfig) -> Self {
        Self::new(digest, config.min_delay())
    }

    /// Reserve an identifier for `secret` and schedule its completion.
    ///
    /// Returns as soon as the identifier is reserved. Empty secrets and
    /// submissions after shutdown was requested are rejected before anything
    /// is reserved.
    pub fn submit(&self, secret: &str, submitted_at: Instant) -> Result<Completion, HashError> {
        if secret.is_empty() {
            return Err(HashError::EmptySecret);
        }
        if self.shutdown.phase() != ShutdownPhase::Running {
            return Err(HashError::ShuttingDown);
        }

        let id = self.registry.reserve();
        tracing::debug!(%id, "reserved entry");
        Ok(self.scheduler.schedule(id, secret.to_owned(), submitted_at))
    }

    /// Final digest for `id`.
    ///
    /// Unknown and still-pending identifiers are both `NotFound`. An empty
    /// digest is indistinguishable from pending and is reported the same way.
    pub fn retrieve(&self, id: EntryId) -> Result<String, HashError> {
        match self.registry.lookup(id) {
            Some(EntryState::Ready(digest)) if !digest.is_empty() => Ok(digest),
            _ => Err(HashError::NotFound),
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Begin draining. Same path as an OS termination signal.
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.shutdown.phase()
    }

    pub fn shutdown_coordinator(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Number of identifiers reserved so far.
    pub fn entry_count(&self) -> usize {
        self.registry.len()
    }

    /// Let in-flight completions finish until `deadline`, then stop.
    ///
    /// Call after the HTTP layer has drained, with the deadline taken when
    /// draining began. Returns `false` if some completions had to be
    /// abandoned.
    pub async fn drain(&self, deadline: Instant) -> bool {
        self.shutdown
            .finish(self.scheduler.tracker(), deadline)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reverse;

    impl SecretDigest for Reverse {
        fn digest(&self, secret: &str) -> String {
            secret.chars().rev().collect()
        }
    }

    struct Blank;

    impl SecretDigest for Blank {
        fn digest(&self, _secret: &str) -> String {
            String::new()
        }
    }

    fn service() -> HashService<Reverse> {
        HashService::new(Reverse, Duration::from_secs(5))
    }

    #[tokio::test(start_paused = true)]
    async fn submit_returns_before_completion() {
        let service = service();
        let start = Instant::now();
        let completion = service.submit("abc", start).unwrap();

        assert_eq!(completion.id(), EntryId(0));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(matches!(service.retrieve(EntryId(0)), Err(HashError::NotFound)));

        assert_eq!(completion.wait().await.unwrap(), "cba");
        assert_eq!(service.retrieve(EntryId(0)).unwrap(), "cba");
    }

    #[tokio::test]
    async fn empty_secret_is_rejected_without_reserving() {
        let service = service();
        assert!(matches!(
            service.submit("", Instant::now()),
            Err(HashError::EmptySecret)
        ));
        assert_eq!(service.entry_count(), 0);
    }

    #[tokio::test]
    async fn submissions_refused_while_draining() {
        let service = service();
        service.request_shutdown();
        assert_eq!(service.phase(), ShutdownPhase::Draining);
        assert!(matches!(
            service.submit("abc", Instant::now()),
            Err(HashError::ShuttingDown)
        ));
        assert_eq!(service.entry_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_submissions_keep_their_own_digests() {
        let service = service();
        let first = service.submit("first", Instant::now()).unwrap();
        let second = service.submit("second", Instant::now()).unwrap();
        let (a, b) = (first.id(), second.id());
        assert_ne!(a, b);

        first.wait().await.unwrap();
        second.wait().await.unwrap();
        assert_eq!(service.retrieve(a).unwrap(), "tsrif");
        assert_eq!(service.retrieve(b).unwrap(), "dnoces");
    }

    #[tokio::test(start_paused = true)]
    async fn id_past_the_last_issued_is_not_found() {
        let service = service();
        let completion = service.submit("abc", Instant::now()).unwrap();
        let last = completion.id();
        completion.wait().await.unwrap();

        assert!(matches!(service.retrieve(last.next()), Err(HashError::NotFound)));
    }

    #[tokio::test(start_paused = true)]
    async fn stats_follow_completions() {
        let service = service();
        assert_eq!(service.stats(), StatsSnapshot { total: 0, average: 0 });

        let completions: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|s| service.submit(s, Instant::now()).unwrap())
            .collect();
        assert_eq!(service.stats().total, 0);

        for c in completions {
            c.wait().await.unwrap();
        }
        let snap = service.stats();
        assert_eq!(snap.total, 4);
        assert!(snap.average >= 5_000);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_digest_reads_as_not_found() {
        let service = HashService::new(Blank, Duration::from_secs(5));
        let completion = service.submit("abc", Instant::now()).unwrap();
        let id = completion.id();
        assert_eq!(completion.wait().await.unwrap(), "");

        assert!(matches!(service.retrieve(id), Err(HashError::NotFound)));
        assert_eq!(service.stats().total, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drain_lets_in_flight_completion_finish() {
        let service = service();
        let completion = service.submit("abc", Instant::now()).unwrap();
        let id = completion.id();
        drop(completion);

        service.request_shutdown();
        assert!(service.drain(Instant::now() + Duration::from_secs(30)).await);
        assert_eq!(service.phase(), ShutdownPhase::Stopped);
        assert_eq!(service.retrieve(id).unwrap(), "cba");
        assert_eq!(service.stats().total, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drain_abandons_work_past_grace_period() {
        let service = service();
        let completion = service.submit("abc", Instant::now()).unwrap();
        let id = completion.id();

        assert!(!service.drain(Instant::now() + Duration::from_secs(1)).await);
        assert!(matches!(completion.wait().await, Err(HashError::Abandoned(i)) if i == id));
        assert!(matches!(service.retrieve(id), Err(HashError::NotFound)));
        assert_eq!(service.stats().total, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drain_deadline_counts_time_already_spent_draining() {
        let service = service();
        let start = Instant::now();
        let completion = service.submit("abc", start).unwrap();

        service.request_shutdown();
        let deadline = start + Duration::from_secs(2);
        tokio::time::advance(Duration::from_millis(1_500)).await;

        assert!(!service.drain(deadline).await);
        assert!(start.elapsed() < Duration::from_secs(3));
        assert!(matches!(completion.wait().await, Err(HashError::Abandoned(_))));
    }
}
