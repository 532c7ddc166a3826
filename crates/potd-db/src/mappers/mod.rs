//! Entity to model mappers
//!
//! Conversions between domain entities (potd-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Upsert` structs: Prepare entity data for database writes

mod item_stats;
mod reaction_event;

pub use item_stats::StatsUpsert;
