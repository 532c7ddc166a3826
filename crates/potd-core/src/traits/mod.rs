//! Store traits (ports)

mod repositories;

pub use repositories::{EventStream, PhotoDirectory, ReactionLogStore, RepoResult, StatsStore};
