//! Business logic services
//!
//! Service layer implementations that validate input, consult the photo
//! directory, write the reaction log and drive stats synchronization.

pub mod context;
pub mod error;
pub mod health;
pub mod period;
pub mod reaction;
pub mod stats;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use period::{resolve_period, ResolvedPeriod};
pub use reaction::ReactionService;
pub use stats::StatsService;
