//! Synchronization controller - sole writer of the stats projection

use futures::TryStreamExt;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use potd_core::{
    aggregate, ItemKey, ReactionEvent, ReactionKind, ReactionLogStore, RepoResult,
    StatsAccumulator, StatsRecord, StatsStore,
};

use super::lock::KeyLocks;
use super::retry::RetryPolicy;

/// Outcome of a full resync pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResyncReport {
    /// Events read from the reaction log
    pub events_scanned: u64,
    /// Stats records written
    pub synced: u64,
    /// Orphaned stats records removed
    pub pruned: u64,
    /// Keys whose write or removal failed after retries
    pub failed: u64,
    pub elapsed_ms: u64,
}

/// Keeps the stats store equal to `aggregate(list_for_item(key))` for every key.
///
/// Incremental recomputes take the resync fence shared and the key's lock
/// exclusively. A full resync takes the fence exclusively, so it never
/// interleaves with a recompute.
pub struct SyncController {
    log: Arc<dyn ReactionLogStore>,
    stats: Arc<dyn StatsStore>,
    locks: KeyLocks,
    retry: RetryPolicy,
    fence: RwLock<()>,
}

impl SyncController {
    pub fn new(
        log: Arc<dyn ReactionLogStore>,
        stats: Arc<dyn StatsStore>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            log,
            stats,
            locks: KeyLocks::new(),
            retry,
            fence: RwLock::new(()),
        }
    }

    /// Per-key lock table (exposed for diagnostics)
    pub fn locks(&self) -> &KeyLocks {
        &self.locks
    }

    // ========================================================================
    // Incremental recompute
    // ========================================================================

    /// Rebuild the stats record for one photo from the reaction log.
    ///
    /// Returns the record now stored, or `None` when the photo has no
    /// reactions left and its record was removed.
    #[instrument(skip(self, key), fields(subject_id = %key.subject_id, item_id = key.item_id))]
    pub async fn recompute(&self, key: &ItemKey) -> RepoResult<Option<StatsRecord>> {
        let _fence = self.fence.read().await;
        let _guard = self.locks.lock(key).await;

        let result = self.retry.run("recompute", || self.recompute_once(key)).await;
        match &result {
            Ok(Some(record)) => debug!(total = record.total, "Stats record updated"),
            Ok(None) => debug!("Stats record removed"),
            Err(e) => error!(error = %e, "Stats recompute failed, record left stale"),
        }
        result
    }

    async fn recompute_once(&self, key: &ItemKey) -> RepoResult<Option<StatsRecord>> {
        let events = self.log.list_for_item(key).await?;
        match aggregate(&events) {
            Some(record) => {
                self.stats.upsert(&record).await?;
                Ok(Some(record))
            }
            None => {
                self.stats.delete(key).await?;
                Ok(None)
            }
        }
    }

    /// Called after a reaction was written to the log
    pub async fn on_reaction_created(
        &self,
        event: &ReactionEvent,
    ) -> RepoResult<Option<StatsRecord>> {
        info!(
            subject_id = %event.subject_id,
            item_id = event.item_id,
            actor_id = %event.actor_id,
            kind = %event.kind,
            created_at = %event.created_at,
            "Reaction created"
        );
        self.recompute(&event.item_key()).await
    }

    /// Called after a reaction's kind was changed in the log
    pub async fn on_reaction_updated(
        &self,
        key: &ItemKey,
        actor_id: &str,
        old_kind: &ReactionKind,
        new_kind: &ReactionKind,
    ) -> RepoResult<Option<StatsRecord>> {
        info!(
            subject_id = %key.subject_id,
            item_id = key.item_id,
            actor_id,
            old_kind = %old_kind,
            new_kind = %new_kind,
            "Reaction updated"
        );
        self.recompute(key).await
    }

    /// Called after a reaction was removed from the log
    pub async fn on_reaction_deleted(
        &self,
        key: &ItemKey,
        actor_id: &str,
    ) -> RepoResult<Option<StatsRecord>> {
        info!(
            subject_id = %key.subject_id,
            item_id = key.item_id,
            actor_id,
            "Reaction deleted"
        );
        self.recompute(key).await
    }

    // ========================================================================
    // Full resync
    // ========================================================================

    /// Rebuild the whole stats store from the reaction log.
    ///
    /// A read error on the log aborts the pass before anything is written.
    /// Per-key write failures are logged, counted and skipped.
    #[instrument(skip(self))]
    pub async fn full_resync(&self) -> RepoResult<ResyncReport> {
        let _fence = self.fence.write().await;
        let started = Instant::now();
        let mut report = ResyncReport::default();

        info!("Starting full stats resync");

        let mut groups: BTreeMap<ItemKey, StatsAccumulator> = BTreeMap::new();
        let mut events = self.log.list_all();
        while let Some(event) = events.try_next().await? {
            report.events_scanned += 1;
            groups
                .entry(event.item_key())
                .or_insert_with_key(|key| StatsAccumulator::new(key.clone()))
                .push(&event);
        }
        drop(events);

        let observed: BTreeSet<ItemKey> = groups.keys().cloned().collect();

        for (key, accumulator) in groups {
            let Some(record) = accumulator.finish() else {
                continue;
            };
            match self.retry.run("resync_upsert", || self.stats.upsert(&record)).await {
                Ok(()) => report.synced += 1,
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to sync stats record");
                    report.failed += 1;
                }
            }
        }

        let existing = self.retry.run("resync_list_keys", || self.stats.list_keys()).await?;
        for key in existing.iter().filter(|key| !observed.contains(*key)) {
            match self.retry.run("resync_prune", || self.stats.delete(key)).await {
                Ok(_) => report.pruned += 1,
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to prune orphaned stats record");
                    report.failed += 1;
                }
            }
        }

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            events_scanned = report.events_scanned,
            synced = report.synced,
            pruned = report.pruned,
            failed = report.failed,
            elapsed_ms = report.elapsed_ms,
            "Full stats resync complete"
        );

        Ok(report)
    }

    /// Startup resync; never fails, errors are logged and startup proceeds
    pub async fn run_startup_resync(&self) -> Option<ResyncReport> {
        match self.full_resync().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "Startup stats resync failed, continuing with existing stats");
                None
            }
        }
    }
}

impl std::fmt::Debug for SyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("retry", &self.retry)
            .field("locked_keys", &self.locks.len())
            .finish_non_exhaustive()
    }
}
