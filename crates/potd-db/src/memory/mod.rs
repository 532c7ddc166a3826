//! In-memory store implementations
//!
//! Backed by `parking_lot` locks over ordered maps. Used when the service runs
//! with `STORAGE_BACKEND=memory` and throughout the test suites.

mod reaction_log;
mod stats;

pub use reaction_log::InMemoryReactionLogStore;
pub use stats::InMemoryStatsStore;
