//! Shutdown coordination: `Running -> Draining -> Stopped`.
//!
//! The phase is derived from two cancellation tokens. `drain` fires when a
//! termination trigger arrives (OS signal or `POST /shutdown`, both through
//! [`ShutdownCoordinator::request_shutdown`]); the HTTP layer stops accepting
//! connections and finishes outstanding requests. `stop` fires once the
//! shutdown deadline has passed; completions still sleeping at that point
//! abandon their write. One deadline covers both the HTTP drain and the
//! completion drain.

use std::fmt;
use std::future::Future;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Lifecycle phase of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    /// Accepting submissions.
    Running,
    /// Refusing new work, letting outstanding work finish.
    Draining,
    /// Terminal; remaining completions are abandoned.
    Stopped,
}

impl fmt::Display for ShutdownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownPhase::Running => write!(f, "running"),
            ShutdownPhase::Draining => write!(f, "draining"),
            ShutdownPhase::Stopped => write!(f, "stopped"),
        }
    }
}

/// Shared handle for triggering and observing shutdown.
///
/// Cloning yields a view of the same tokens.
#[derive(Debug, Clone, Default)]
pub struct ShutdownCoordinator {
    drain: CancellationToken,
    stop: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move from `Running` to `Draining`. Repeated calls are no-ops.
    pub fn request_shutdown(&self) {
        if !self.drain.is_cancelled() {
            tracing::info!("shutdown requested, draining");
        }
        self.drain.cancel();
    }

    pub fn phase(&self) -> ShutdownPhase {
        if self.stop.is_cancelled() {
            ShutdownPhase::Stopped
        } else if self.drain.is_cancelled() {
            ShutdownPhase::Draining
        } else {
            ShutdownPhase::Running
        }
    }

    /// Resolves once draining has begun. Suitable for
    /// `axum::serve(..).with_graceful_shutdown`.
    pub fn draining(&self) -> impl Future<Output = ()> + Send + 'static {
        self.drain.clone().cancelled_owned()
    }

    /// Token cancelled when the service reaches `Stopped`.
    ///
    /// Child token: holders can observe the stop but cannot trigger it.
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.child_token()
    }

    /// Wait until `deadline` for the tracked completions, then enter `Stopped`.
    ///
    /// Returns `true` when every completion finished in time. Completions
    /// still pending afterwards are abandoned; that loss is logged, not
    /// escalated.
    pub async fn finish(&self, tracker: &TaskTracker, deadline: Instant) -> bool {
        self.request_shutdown();
        tracker.close();

        let outstanding = tracker.len();
        if outstanding > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            tracing::info!(
                outstanding,
                remaining_ms = remaining.as_millis() as u64,
                "waiting for in-flight completions"
            );
        }

        let drained = tokio::time::timeout_at(deadline, tracker.wait()).await.is_ok();
        if !drained {
            tracing::warn!(
                outstanding = tracker.len(),
                "shutdown deadline passed, abandoning in-flight completions"
            );
        }

        self.stop.cancel();
        tracker.wait().await;
        tracing::info!("stopped");
        drained
    }
}
