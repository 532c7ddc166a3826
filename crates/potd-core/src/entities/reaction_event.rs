//! Reaction event - one actor's reaction to one photo (authoritative record)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ItemKey, ReactionKind};

/// Reaction event entity
///
/// At most one event exists per `(subject_id, item_id, actor_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub subject_id: String,
    pub item_id: i64,
    pub actor_id: String,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReactionEvent {
    /// Create a new ReactionEvent stamped at `now`
    pub fn new(
        key: &ItemKey,
        actor_id: impl Into<String>,
        kind: ReactionKind,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_id: key.subject_id.clone(),
            item_id: key.item_id,
            actor_id: actor_id.into(),
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Key of the photo this reaction targets
    pub fn item_key(&self) -> ItemKey {
        ItemKey::new(self.subject_id.clone(), self.item_id)
    }

    /// Check if the reaction targets the given photo
    #[inline]
    pub fn belongs_to(&self, key: &ItemKey) -> bool {
        self.item_id == key.item_id && self.subject_id == key.subject_id
    }

    /// Change the reaction kind, returning the previous one.
    ///
    /// `created_at` is left untouched.
    pub fn change_kind(&mut self, kind: ReactionKind, now: DateTime<Utc>) -> ReactionKind {
        self.updated_at = now;
        std::mem::replace(&mut self.kind, kind)
    }
}
