//! # potd-core
//!
//! Domain layer for the photo-of-the-day stats engine: reaction events, the
//! derived stats projection, the aggregation that links them, and the store
//! traits the infrastructure layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod stats;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ReactionEvent, StatsRecord};
pub use error::DomainError;
pub use stats::{aggregate, select_best, StatsAccumulator};
pub use traits::{EventStream, PhotoDirectory, ReactionLogStore, RepoResult, StatsStore};
pub use value_objects::{AllowedReactions, ItemKey, ReactionKind, TimeWindow};
