//! In-memory StatsStore

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use potd_core::entities::StatsRecord;
use potd_core::stats::select_best;
use potd_core::traits::{RepoResult, StatsStore};
use potd_core::value_objects::{ItemKey, TimeWindow};

/// Stats projection held in process memory
#[derive(Debug, Default)]
pub struct InMemoryStatsStore {
    records: RwLock<BTreeMap<ItemKey, StatsRecord>>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored record, ordered by key
    pub fn snapshot(&self) -> Vec<StatsRecord> {
        self.records.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn upsert(&self, record: &StatsRecord) -> RepoResult<()> {
        self.records
            .write()
            .insert(record.item_key(), record.clone());
        Ok(())
    }

    async fn delete(&self, key: &ItemKey) -> RepoResult<bool> {
        Ok(self.records.write().remove(key).is_some())
    }

    async fn get(&self, key: &ItemKey) -> RepoResult<Option<StatsRecord>> {
        Ok(self.records.read().get(key).cloned())
    }

    async fn find_best_in_window(&self, window: &TimeWindow) -> RepoResult<Option<StatsRecord>> {
        let records = self.records.read();
        Ok(select_best(records.values(), window).cloned())
    }

    async fn list_keys(&self) -> RepoResult<Vec<ItemKey>> {
        Ok(self.records.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use potd_core::value_objects::ReactionKind;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()
    }

    fn record(subject: &str, item: i64, total: i64, last: DateTime<Utc>) -> StatsRecord {
        let mut breakdown = BTreeMap::new();
        breakdown.insert(ReactionKind::new("coeur"), total);
        StatsRecord {
            subject_id: subject.to_string(),
            item_id: item,
            breakdown,
            total,
            first_reaction_at: last,
            last_reaction_at: last,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_record() {
        let store = InMemoryStatsStore::new();
        store.upsert(&record("john", 5, 3, base())).await.unwrap();
        store.upsert(&record("john", 5, 1, base())).await.unwrap();

        let stored = store.get(&ItemKey::new("john", 5)).await.unwrap().unwrap();
        assert_eq!(stored.total, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_best_respects_window_and_ties() {
        let store = InMemoryStatsStore::new();
        let window = TimeWindow::new(base(), base() + Duration::days(1)).unwrap();

        store.upsert(&record("zed", 1, 4, base() + Duration::hours(1))).await.unwrap();
        store.upsert(&record("amy", 2, 4, base() + Duration::hours(2))).await.unwrap();
        // Outside the window (end is exclusive)
        store.upsert(&record("bob", 3, 9, base() + Duration::days(1))).await.unwrap();

        let best = store.find_best_in_window(&window).await.unwrap().unwrap();
        assert_eq!(best.item_key(), ItemKey::new("amy", 2));
    }

    #[tokio::test]
    async fn test_delete_and_list_keys() {
        let store = InMemoryStatsStore::new();
        store.upsert(&record("john", 5, 1, base())).await.unwrap();
        store.upsert(&record("ann", 1, 1, base())).await.unwrap();

        assert!(store.delete(&ItemKey::new("john", 5)).await.unwrap());
        assert!(!store.delete(&ItemKey::new("john", 5)).await.unwrap());
        assert_eq!(store.list_keys().await.unwrap(), vec![ItemKey::new("ann", 1)]);
        assert_eq!(store.snapshot().len(), 1);
    }
}
