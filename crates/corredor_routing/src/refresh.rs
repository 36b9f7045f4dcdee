use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::congestion::TrafficSegment;
use crate::error::FeedError;
use crate::snapshot::{GraphSnapshot, SnapshotManager};

/// Live congestion readings joined with their segment geometry.
pub trait CongestionFeed: Send + Sync + 'static {
    fn fetch_segments(
        &self,
    ) -> impl Future<Output = Result<Vec<TrafficSegment>, FeedError>> + Send;
}

#[derive(Debug, Clone, Copy)]
pub struct RefreshParams {
    pub interval: Duration,
    pub feed_timeout: Duration,
}

impl Default for RefreshParams {
    fn default() -> Self {
        RefreshParams {
            interval: Duration::from_secs(5 * 60),
            feed_timeout: Duration::from_secs(30),
        }
    }
}

/// Periodically rebuilds congestion costs off to the side and publishes them
/// as a new snapshot. A failed cycle publishes nothing.
pub struct RefreshScheduler<F> {
    feed: F,
    manager: Arc<SnapshotManager>,
    params: RefreshParams,
}

impl<F: CongestionFeed> RefreshScheduler<F> {
    pub fn new(feed: F, manager: Arc<SnapshotManager>, params: RefreshParams) -> Self {
        RefreshScheduler {
            feed,
            manager,
            params,
        }
    }

    /// Runs a single fetch/map/cost/publish cycle and returns the published
    /// version.
    pub async fn refresh_once(&self) -> Result<u64, FeedError> {
        let segments = tokio::time::timeout(self.params.feed_timeout, self.feed.fetch_segments())
            .await
            .map_err(|_| FeedError::Timeout(self.params.feed_timeout))??;

        let current = self.manager.current();
        let graph = Arc::clone(current.graph());
        let index = Arc::clone(current.index());
        let version = self.manager.next_version();
        drop(current);

        let snapshot = tokio::task::spawn_blocking(move || {
            GraphSnapshot::build(graph, index, &segments, version)
        })
        .await
        .map_err(|err| FeedError::Task(err.to_string()))?;

        if !self.manager.publish(snapshot) {
            return Err(FeedError::Task(format!(
                "snapshot {version} was superseded before publication"
            )));
        }

        Ok(version)
    }

    /// Refreshes immediately, then every `interval`, until `shutdown` changes
    /// or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.params.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval = ?self.params.interval, "Starting congestion refresh");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.refresh_once().await {
                        Ok(version) => info!(version, "Congestion refresh completed"),
                        Err(err) => warn!(%err, "Congestion refresh aborted, keeping current snapshot"),
                    }
                }
                _ = shutdown.changed() => {
                    info!("Stopping congestion refresh");
                    break;
                }
            }
        }
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
