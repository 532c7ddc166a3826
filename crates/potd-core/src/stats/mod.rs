//! Stats aggregation - pure derivation of [`StatsRecord`](crate::StatsRecord)s
//! from reaction events

mod aggregate;
mod best;

pub use aggregate::{aggregate, StatsAccumulator};
pub use best::select_best;
