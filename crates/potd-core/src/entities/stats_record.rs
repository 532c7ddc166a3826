//! Stats record - per-photo projection derived from reaction events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value_objects::{ItemKey, ReactionKind, TimeWindow};

/// Derived reaction statistics for one photo.
///
/// Only ever built by the aggregator, so a record always has `total > 0`,
/// `total == sum(breakdown)` and no zero-count breakdown entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub subject_id: String,
    pub item_id: i64,
    pub breakdown: BTreeMap<ReactionKind, i64>,
    pub total: i64,
    pub first_reaction_at: DateTime<Utc>,
    pub last_reaction_at: DateTime<Utc>,
}

impl StatsRecord {
    pub fn item_key(&self) -> ItemKey {
        ItemKey::new(self.subject_id.clone(), self.item_id)
    }

    /// Count for one reaction kind (0 when absent)
    pub fn count(&self, kind: &str) -> i64 {
        self.breakdown
            .iter()
            .find(|(k, _)| k.as_str() == kind)
            .map_or(0, |(_, count)| *count)
    }

    /// Whether the photo's latest reaction falls in the window
    #[inline]
    pub fn is_active_in(&self, window: &TimeWindow) -> bool {
        self.total > 0 && window.contains(self.last_reaction_at)
    }

    /// Breakdown with plain string keys, as exposed to clients
    pub fn breakdown_map(&self) -> BTreeMap<String, i64> {
        self.breakdown
            .iter()
            .map(|(kind, count)| (kind.to_string(), *count))
            .collect()
    }

    /// Check the internal invariants of the record
    pub fn is_consistent(&self) -> bool {
        self.total > 0
            && self.breakdown.values().all(|c| *c > 0)
            && self.breakdown.values().sum::<i64>() == self.total
            && self.first_reaction_at <= self.last_reaction_at
    }
}
