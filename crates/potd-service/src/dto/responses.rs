//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Reaction Responses
// ============================================================================

/// One reaction on a photo
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub display_name: String,
    pub photo_id: i64,
    pub reactor_name: String,
    pub reaction: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// All reactions on a photo
#[derive(Debug, Clone, Serialize)]
pub struct PhotoReactionsResponse {
    pub display_name: String,
    pub photo_id: i64,
    pub reactions: Vec<ReactionResponse>,
    pub total_reactions: usize,
}

// ============================================================================
// Stats Responses
// ============================================================================

/// Aggregated stats for one photo
#[derive(Debug, Clone, Serialize)]
pub struct PhotoStatsResponse {
    pub display_name: String,
    pub photo_id: i64,
    pub total: i64,
    pub breakdown: BTreeMap<String, i64>,
    pub first_reaction_at: DateTime<Utc>,
    pub last_reaction_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionTotalsResponse {
    pub total: i64,
    pub breakdown: BTreeMap<String, i64>,
}

/// The photo that won a period
#[derive(Debug, Clone, Serialize)]
pub struct WinningPhotoResponse {
    pub display_name: String,
    pub photo_id: i64,
    pub reactions: ReactionTotalsResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodResponse {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
}

/// Photo of the day lookup result
#[derive(Debug, Clone, Serialize)]
pub struct PhotoOfDayResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<WinningPhotoResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub period: PeriodResponse,
}

impl PhotoOfDayResponse {
    pub fn found(photo: WinningPhotoResponse, period: PeriodResponse) -> Self {
        Self {
            found: true,
            photo: Some(photo),
            message: None,
            period,
        }
    }

    pub fn not_found(period: PeriodResponse) -> Self {
        Self {
            found: false,
            photo: None,
            message: Some(format!("No photo found for {}", period.description)),
            period,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub reaction_log: String,
    pub stats_store: String,
}

impl ReadinessResponse {
    pub fn ready(log_healthy: bool, stats_healthy: bool) -> Self {
        let all_healthy = log_healthy && stats_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                reaction_log: if log_healthy { "healthy" } else { "unhealthy" }.to_string(),
                stats_store: if stats_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
