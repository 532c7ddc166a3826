//! ReactionEvent entity <-> model mapper

use potd_core::entities::ReactionEvent;
use potd_core::value_objects::ReactionKind;

use crate::models::ReactionEventModel;

/// Convert ReactionEventModel to ReactionEvent entity
impl From<ReactionEventModel> for ReactionEvent {
    fn from(model: ReactionEventModel) -> Self {
        ReactionEvent {
            subject_id: model.subject_id,
            item_id: model.item_id,
            actor_id: model.actor_id,
            kind: ReactionKind::new(model.kind),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
