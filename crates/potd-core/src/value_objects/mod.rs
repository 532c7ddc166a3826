//! Value objects - immutable types that represent domain concepts

mod item_key;
mod reaction_kind;
mod time_window;

pub use item_key::ItemKey;
pub use reaction_kind::{AllowedReactions, ReactionKind, DEFAULT_REACTIONS};
pub use time_window::TimeWindow;
