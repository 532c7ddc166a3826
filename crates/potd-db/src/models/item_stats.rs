//! Item stats database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::BTreeMap;

/// Database model for item_stats table
#[derive(Debug, Clone, FromRow)]
pub struct ItemStatsModel {
    pub subject_id: String,
    pub item_id: i64,
    pub breakdown: Json<BTreeMap<String, i64>>,
    pub total: i64,
    pub first_reaction_at: DateTime<Utc>,
    pub last_reaction_at: DateTime<Utc>,
}

/// Key columns only (from key listing)
#[derive(Debug, Clone, FromRow)]
pub struct ItemKeyModel {
    pub subject_id: String,
    pub item_id: i64,
}
