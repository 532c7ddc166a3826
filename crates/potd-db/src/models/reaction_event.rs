//! Reaction event database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reaction_events table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionEventModel {
    pub subject_id: String,
    pub item_id: i64,
    pub actor_id: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row returned by a kind change, carrying the kind it replaced
#[derive(Debug, Clone, FromRow)]
pub struct UpdatedReactionModel {
    #[sqlx(flatten)]
    pub event: ReactionEventModel,
    pub previous_kind: String,
}
