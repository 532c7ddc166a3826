//! Store implementations
//!
//! PostgreSQL implementations of the store traits defined in potd-core.

mod error;
mod reaction_log;
mod stats;

pub use reaction_log::PgReactionLogStore;
pub use stats::PgStatsStore;
