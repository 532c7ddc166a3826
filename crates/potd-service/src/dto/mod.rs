//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{AddReactionRequest, PhotoOfDayQuery, UpdateReactionRequest};

pub use responses::{
    HealthChecks, HealthResponse, PeriodResponse, PhotoOfDayResponse,
    PhotoReactionsResponse, PhotoStatsResponse, ReactionResponse, ReactionTotalsResponse,
    ReadinessResponse, WinningPhotoResponse,
};
