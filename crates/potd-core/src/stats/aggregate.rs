//! Aggregation of reaction events into a per-photo stats record

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::entities::{ReactionEvent, StatsRecord};
use crate::value_objects::{ItemKey, ReactionKind};

/// Folds the reaction events of one photo into a [`StatsRecord`].
///
/// Events are counted in any order; the result only depends on the set of
/// events pushed. Timestamps come from `created_at` so editing a reaction's
/// kind never moves the photo in the timeline.
#[derive(Debug, Clone)]
pub struct StatsAccumulator {
    key: ItemKey,
    breakdown: BTreeMap<ReactionKind, i64>,
    total: i64,
    first: Option<DateTime<Utc>>,
    last: Option<DateTime<Utc>>,
}

impl StatsAccumulator {
    pub fn new(key: ItemKey) -> Self {
        Self {
            key,
            breakdown: BTreeMap::new(),
            total: 0,
            first: None,
            last: None,
        }
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Number of events folded so far
    pub fn len(&self) -> i64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Add one event. Events for another photo are ignored and `false` is returned.
    pub fn push(&mut self, event: &ReactionEvent) -> bool {
        if !event.belongs_to(&self.key) {
            return false;
        }

        *self.breakdown.entry(event.kind.clone()).or_insert(0) += 1;
        self.total += 1;
        self.first = Some(self.first.map_or(event.created_at, |t| t.min(event.created_at)));
        self.last = Some(self.last.map_or(event.created_at, |t| t.max(event.created_at)));
        true
    }

    /// Produce the record, or `None` when no event was folded
    pub fn finish(self) -> Option<StatsRecord> {
        let (Some(first), Some(last)) = (self.first, self.last) else {
            return None;
        };

        Some(StatsRecord {
            subject_id: self.key.subject_id,
            item_id: self.key.item_id,
            breakdown: self.breakdown,
            total: self.total,
            first_reaction_at: first,
            last_reaction_at: last,
        })
    }
}

/// Compute the stats record for a set of reaction events of one photo.
///
/// The photo is the one targeted by the first event; events for any other
/// photo are skipped. Returns `None` for an empty input, never a zero-valued
/// record.
pub fn aggregate<'a, I>(events: I) -> Option<StatsRecord>
where
    I: IntoIterator<Item = &'a ReactionEvent>,
{
    let mut events = events.into_iter();
    let first = events.next()?;

    let mut acc = StatsAccumulator::new(first.item_key());
    acc.push(first);
    for event in events {
        acc.push(event);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, minute, 0).unwrap()
    }

    fn event(actor: &str, kind: &str, created_at: DateTime<Utc>) -> ReactionEvent {
        ReactionEvent::new(&ItemKey::new("j", 5), actor, ReactionKind::new(kind), created_at)
    }

    fn scenario_a() -> Vec<ReactionEvent> {
        vec![
            event("alice", "coeur", t(1)),
            event("bob", "coeur", t(2)),
            event("carol", "fire", t(3)),
        ]
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(aggregate(&Vec::<ReactionEvent>::new()).is_none());
        assert!(StatsAccumulator::new(ItemKey::new("j", 5)).finish().is_none());
    }

    #[test]
    fn test_scenario_a_counts_and_bounds() {
        let record = aggregate(&scenario_a()).unwrap();

        assert_eq!(record.subject_id, "j");
        assert_eq!(record.item_id, 5);
        assert_eq!(record.total, 3);
        assert_eq!(record.count("coeur"), 2);
        assert_eq!(record.count("fire"), 1);
        assert_eq!(record.breakdown.len(), 2);
        assert_eq!(record.first_reaction_at, t(1));
        assert_eq!(record.last_reaction_at, t(3));
        assert!(record.is_consistent());
    }

    #[test]
    fn test_scenario_b_removing_one_contributor() {
        let events: Vec<_> = scenario_a()
            .into_iter()
            .filter(|e| e.actor_id != "bob")
            .collect();
        let record = aggregate(&events).unwrap();

        assert_eq!(record.total, 2);
        assert_eq!(record.count("coeur"), 1);
        assert_eq!(record.count("fire"), 1);
        assert_eq!(record.first_reaction_at, t(1));
        assert_eq!(record.last_reaction_at, t(3));
    }

    #[test]
    fn test_scenario_d_update_keeps_first_and_drops_old_kind() {
        let mut events = scenario_a();
        events.retain(|e| e.actor_id != "bob");
        events[0].change_kind(ReactionKind::new("fire"), t(50));

        let record = aggregate(&events).unwrap();
        assert_eq!(record.total, 2);
        assert_eq!(record.count("fire"), 2);
        assert!(!record.breakdown.contains_key(&ReactionKind::new("coeur")));
        assert_eq!(record.first_reaction_at, t(1));
        assert_eq!(record.last_reaction_at, t(3));
    }

    #[test]
    fn test_deterministic_and_order_independent() {
        let events = scenario_a();
        let mut reversed = events.clone();
        reversed.reverse();

        let a = aggregate(&events);
        let b = aggregate(&events);
        let c = aggregate(&reversed);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_events_for_other_items_are_skipped() {
        let mut events = scenario_a();
        events.push(ReactionEvent::new(
            &ItemKey::new("j", 6),
            "dave",
            ReactionKind::new("wow"),
            t(59),
        ));

        let record = aggregate(&events).unwrap();
        assert_eq!(record.total, 3);
        assert_eq!(record.count("wow"), 0);
        assert_eq!(record.last_reaction_at, t(3));
    }

    #[test]
    fn test_updated_at_is_ignored_for_bounds() {
        let mut events = scenario_a();
        events[2].updated_at = t(3) + Duration::days(10);

        let record = aggregate(&events).unwrap();
        assert_eq!(record.last_reaction_at, t(3));
    }

    #[test]
    fn test_accumulator_reports_foreign_events() {
        let mut acc = StatsAccumulator::new(ItemKey::new("j", 5));
        assert!(acc.push(&event("alice", "coeur", t(1))));
        assert!(!acc.push(&ReactionEvent::new(
            &ItemKey::new("k", 5),
            "bob",
            ReactionKind::new("coeur"),
            t(2),
        )));
        assert_eq!(acc.len(), 1);
    }
}
