//! StatsRecord entity <-> model mapper

use sqlx::types::Json;
use std::collections::BTreeMap;

use potd_core::entities::StatsRecord;
use potd_core::value_objects::{ItemKey, ReactionKind};

use crate::models::{ItemKeyModel, ItemStatsModel};

/// Convert ItemStatsModel to StatsRecord entity
impl From<ItemStatsModel> for StatsRecord {
    fn from(model: ItemStatsModel) -> Self {
        let breakdown = model
            .breakdown
            .0
            .into_iter()
            .map(|(kind, count)| (ReactionKind::new(kind), count))
            .collect();

        StatsRecord {
            subject_id: model.subject_id,
            item_id: model.item_id,
            breakdown,
            total: model.total,
            first_reaction_at: model.first_reaction_at,
            last_reaction_at: model.last_reaction_at,
        }
    }
}

impl From<ItemKeyModel> for ItemKey {
    fn from(model: ItemKeyModel) -> Self {
        ItemKey::new(model.subject_id, model.item_id)
    }
}

/// Values of a StatsRecord for a full-row upsert
pub struct StatsUpsert<'a> {
    pub subject_id: &'a str,
    pub item_id: i64,
    pub breakdown: Json<BTreeMap<String, i64>>,
    pub total: i64,
}

impl<'a> StatsUpsert<'a> {
    pub fn new(record: &'a StatsRecord) -> Self {
        Self {
            subject_id: &record.subject_id,
            item_id: record.item_id,
            breakdown: Json(record.breakdown_map()),
            total: record.total,
        }
    }
}
