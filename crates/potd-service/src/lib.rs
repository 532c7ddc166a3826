//! # potd-service
//!
//! Application layer: keeps the stats projection in step with the reaction
//! log, answers window queries, and implements the reaction use cases.

pub mod clients;
pub mod dto;
pub mod query;
pub mod services;
pub mod sync;

pub use clients::{HttpPhotoDirectory, UncheckedPhotoDirectory};
pub use dto::*;
pub use query::WindowQueryEngine;
pub use services::{
    HealthService, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, StatsService,
};
pub use sync::{KeyLocks, ResyncReport, RetryPolicy, SyncController};
