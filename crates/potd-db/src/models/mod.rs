//! Database models - SQLx-compatible structs for PostgreSQL tables

mod item_stats;
mod reaction_event;

pub use item_stats::{ItemKeyModel, ItemStatsModel};
pub use reaction_event::{ReactionEventModel, UpdatedReactionModel};
