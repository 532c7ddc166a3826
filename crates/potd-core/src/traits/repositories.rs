//! Store traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

use crate::entities::{ReactionEvent, StatsRecord};
use crate::error::DomainError;
use crate::value_objects::{ItemKey, ReactionKind, TimeWindow};

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Lazy stream of reaction events
pub type EventStream<'a> = BoxStream<'a, RepoResult<ReactionEvent>>;

// ============================================================================
// Reaction Log Store
// ============================================================================

/// Authoritative store of reaction events keyed by `(subject_id, item_id, actor_id)`
#[async_trait]
pub trait ReactionLogStore: Send + Sync {
    /// Find one actor's reaction on a photo
    async fn find(&self, key: &ItemKey, actor_id: &str) -> RepoResult<Option<ReactionEvent>>;

    /// Insert a new event.
    ///
    /// Fails with `ReactionAlreadyExists` when the actor already reacted.
    async fn create(&self, event: &ReactionEvent) -> RepoResult<()>;

    /// Insert or overwrite an event
    async fn put(&self, event: &ReactionEvent) -> RepoResult<()>;

    /// Change the kind of an existing event in place, keeping `created_at`.
    ///
    /// Returns the previous kind and the stored event. Fails with
    /// `ReactionNotFound` when the event is gone; never inserts.
    async fn update(
        &self,
        key: &ItemKey,
        actor_id: &str,
        kind: &ReactionKind,
        now: DateTime<Utc>,
    ) -> RepoResult<(ReactionKind, ReactionEvent)>;

    /// Remove one event, returning whether a row existed
    async fn delete(&self, key: &ItemKey, actor_id: &str) -> RepoResult<bool>;

    /// All events for one photo, oldest first
    async fn list_for_item(&self, key: &ItemKey) -> RepoResult<Vec<ReactionEvent>>;

    /// Stream every event in the store.
    ///
    /// Each call starts a fresh pass over the data.
    fn list_all(&self) -> EventStream<'_>;

    /// Verify the backing storage is reachable
    async fn health_check(&self) -> RepoResult<()>;
}

// ============================================================================
// Stats Store
// ============================================================================

/// Projection of per-photo stats keyed by `(subject_id, item_id)`
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Replace the record stored for the record's key
    async fn upsert(&self, record: &StatsRecord) -> RepoResult<()>;

    /// Remove a record, returning whether one existed
    async fn delete(&self, key: &ItemKey) -> RepoResult<bool>;

    /// Get the record for one photo
    async fn get(&self, key: &ItemKey) -> RepoResult<Option<StatsRecord>>;

    /// Highest-total record whose `last_reaction_at` lies in the window.
    ///
    /// Ties go to the lowest `(subject_id, item_id)`.
    async fn find_best_in_window(&self, window: &TimeWindow) -> RepoResult<Option<StatsRecord>>;

    /// Keys of every stored record
    async fn list_keys(&self) -> RepoResult<Vec<ItemKey>>;

    /// Verify the backing storage is reachable
    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Photo Directory
// ============================================================================

/// External lookup of photo existence (owned by the photo service)
#[async_trait]
pub trait PhotoDirectory: Send + Sync {
    async fn photo_exists(&self, key: &ItemKey) -> RepoResult<bool>;
}
