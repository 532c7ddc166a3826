//! Test fixtures
//!
//! Request bodies and the response shapes the tests read back.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Add reaction request
#[derive(Debug, Serialize)]
pub struct AddReaction {
    pub reactor_name: String,
    pub reaction: String,
}

impl AddReaction {
    pub fn new(reactor_name: &str, reaction: &str) -> Self {
        Self {
            reactor_name: reactor_name.to_string(),
            reaction: reaction.to_string(),
        }
    }

    /// A reactor name nobody else in the run uses
    pub fn unique(reaction: &str) -> Self {
        Self::new(&format!("reactor{}", unique_suffix()), reaction)
    }
}

/// Update reaction request
#[derive(Debug, Serialize)]
pub struct UpdateReaction {
    pub reaction: String,
}

impl UpdateReaction {
    pub fn new(reaction: &str) -> Self {
        Self {
            reaction: reaction.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Reaction {
    pub display_name: String,
    pub photo_id: i64,
    pub reactor_name: String,
    pub reaction: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoReactions {
    pub display_name: String,
    pub photo_id: i64,
    pub total_reactions: usize,
    pub reactions: Vec<Reaction>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoStats {
    pub display_name: String,
    pub photo_id: i64,
    pub total: i64,
    pub breakdown: BTreeMap<String, i64>,
    pub first_reaction_at: DateTime<Utc>,
    pub last_reaction_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionTotals {
    pub total: i64,
    pub breakdown: BTreeMap<String, i64>,
}

#[derive(Debug, Deserialize)]
pub struct WinningPhoto {
    pub display_name: String,
    pub photo_id: i64,
    pub reactions: ReactionTotals,
}

#[derive(Debug, Deserialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PhotoOfDay {
    pub found: bool,
    pub photo: Option<WinningPhoto>,
    pub message: Option<String>,
    pub period: Period,
}

#[derive(Debug, Deserialize)]
pub struct ResyncReport {
    pub events_scanned: u64,
    pub synced: u64,
    pub pruned: u64,
    pub failed: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}
