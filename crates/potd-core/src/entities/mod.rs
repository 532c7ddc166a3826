//! Domain entities - core business objects

mod reaction_event;
mod stats_record;

pub use reaction_event::ReactionEvent;
pub use stats_record::StatsRecord;
