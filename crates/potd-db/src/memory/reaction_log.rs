//! In-memory ReactionLogStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use potd_core::entities::ReactionEvent;
use potd_core::error::DomainError;
use potd_core::traits::{EventStream, ReactionLogStore, RepoResult};
use potd_core::value_objects::{ItemKey, ReactionKind};

type EventKey = (ItemKey, String);

/// Reaction log held in process memory
#[derive(Debug, Default)]
pub struct InMemoryReactionLogStore {
    events: RwLock<BTreeMap<EventKey, ReactionEvent>>,
}

impl InMemoryReactionLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl ReactionLogStore for InMemoryReactionLogStore {
    async fn find(&self, key: &ItemKey, actor_id: &str) -> RepoResult<Option<ReactionEvent>> {
        let events = self.events.read();
        Ok(events.get(&(key.clone(), actor_id.to_string())).cloned())
    }

    async fn create(&self, event: &ReactionEvent) -> RepoResult<()> {
        match self
            .events
            .write()
            .entry((event.item_key(), event.actor_id.clone()))
        {
            Entry::Occupied(_) => Err(DomainError::ReactionAlreadyExists {
                key: event.item_key(),
                actor_id: event.actor_id.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(event.clone());
                Ok(())
            }
        }
    }

    async fn put(&self, event: &ReactionEvent) -> RepoResult<()> {
        self.events
            .write()
            .insert((event.item_key(), event.actor_id.clone()), event.clone());
        Ok(())
    }

    async fn update(
        &self,
        key: &ItemKey,
        actor_id: &str,
        kind: &ReactionKind,
        now: DateTime<Utc>,
    ) -> RepoResult<(ReactionKind, ReactionEvent)> {
        let mut events = self.events.write();
        let event = events
            .get_mut(&(key.clone(), actor_id.to_string()))
            .ok_or_else(|| DomainError::ReactionNotFound {
                key: key.clone(),
                actor_id: actor_id.to_string(),
            })?;
        let previous = event.change_kind(kind.clone(), now);
        Ok((previous, event.clone()))
    }

    async fn delete(&self, key: &ItemKey, actor_id: &str) -> RepoResult<bool> {
        let removed = self
            .events
            .write()
            .remove(&(key.clone(), actor_id.to_string()));
        Ok(removed.is_some())
    }

    async fn list_for_item(&self, key: &ItemKey) -> RepoResult<Vec<ReactionEvent>> {
        // Events are keyed by item first, so one item's events are contiguous
        let mut found: Vec<ReactionEvent> = self
            .events
            .read()
            .range((key.clone(), String::new())..)
            .take_while(|((item, _), _)| item == key)
            .map(|(_, event)| event.clone())
            .collect();
        found.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.actor_id.cmp(&b.actor_id))
        });
        Ok(found)
    }

    fn list_all(&self) -> EventStream<'_> {
        // Snapshot so the lock is not held across the caller's awaits
        let snapshot: Vec<ReactionEvent> = self.events.read().values().cloned().collect();
        futures::stream::iter(snapshot.into_iter().map(Ok)).boxed()
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
