//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use potd_core::entities::{ReactionEvent, StatsRecord};

use super::responses::{
    PhotoStatsResponse, ReactionResponse, ReactionTotalsResponse, WinningPhotoResponse,
};

impl From<&ReactionEvent> for ReactionResponse {
    fn from(event: &ReactionEvent) -> Self {
        Self {
            display_name: event.subject_id.clone(),
            photo_id: event.item_id,
            reactor_name: event.actor_id.clone(),
            reaction: event.kind.to_string(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<ReactionEvent> for ReactionResponse {
    fn from(event: ReactionEvent) -> Self {
        Self::from(&event)
    }
}

impl From<&StatsRecord> for PhotoStatsResponse {
    fn from(record: &StatsRecord) -> Self {
        Self {
            display_name: record.subject_id.clone(),
            photo_id: record.item_id,
            total: record.total,
            breakdown: record.breakdown_map(),
            first_reaction_at: record.first_reaction_at,
            last_reaction_at: record.last_reaction_at,
        }
    }
}

impl From<&StatsRecord> for WinningPhotoResponse {
    fn from(record: &StatsRecord) -> Self {
        Self {
            display_name: record.subject_id.clone(),
            photo_id: record.item_id,
            reactions: ReactionTotalsResponse {
                total: record.total,
                breakdown: record.breakdown_map(),
            },
        }
    }
}
