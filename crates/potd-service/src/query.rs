//! Window query engine - read-only access to the stats projection

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

use potd_core::{DomainError, ItemKey, RepoResult, StatsRecord, StatsStore, TimeWindow};

/// Bounded-time reads against the stats store
#[derive(Clone)]
pub struct WindowQueryEngine {
    stats: Arc<dyn StatsStore>,
    timeout: Duration,
}

impl WindowQueryEngine {
    pub fn new(stats: Arc<dyn StatsStore>, timeout: Duration) -> Self {
        Self { stats, timeout }
    }

    /// Most-reacted photo whose latest reaction falls in `[start, end)`
    #[instrument(skip(self))]
    pub async fn query_best_in_window(&self, window: &TimeWindow) -> RepoResult<Option<StatsRecord>> {
        self.bounded("find_best_in_window", self.stats.find_best_in_window(window))
            .await
    }

    /// Stats for one photo
    #[instrument(skip(self))]
    pub async fn query_stats(&self, key: &ItemKey) -> RepoResult<Option<StatsRecord>> {
        self.bounded("get_stats", self.stats.get(key)).await
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> RepoResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, timeout_ms = self.timeout.as_millis() as u64, "Stats query timed out");
                Err(DomainError::StorageUnavailable(format!(
                    "{op} timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

impl std::fmt::Debug for WindowQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowQueryEngine")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
