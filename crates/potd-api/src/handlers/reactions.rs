//! Reaction handlers
//!
//! Endpoints for adding, listing, changing and removing photo reactions.

use axum::extract::{Path, State};
use potd_service::{
    AddReactionRequest, PhotoReactionsResponse, ReactionResponse, ReactionService,
    UpdateReactionRequest,
};

use crate::extractors::{PhotoPath, ReactorPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Add a reaction to a photo
///
/// POST /reactions/{display_name}/{photo_id}
pub async fn add_reaction(
    State(state): State<AppState>,
    Path(path): Path<PhotoPath>,
    ValidatedJson(request): ValidatedJson<AddReactionRequest>,
) -> ApiResult<Created<ApiJson<ReactionResponse>>> {
    let photo_id = path.photo_id()?;

    let service = ReactionService::new(state.service_context());
    let reaction = service
        .add_reaction(&path.display_name, photo_id, request)
        .await?;

    let location = format!(
        "/reactions/{}/{}/{}",
        reaction.display_name, reaction.photo_id, reaction.reactor_name
    );
    Ok(Created::new(ApiJson(reaction)).with_location(location))
}

/// List reactions on a photo
///
/// GET /reactions/{display_name}/{photo_id}
pub async fn get_photo_reactions(
    State(state): State<AppState>,
    Path(path): Path<PhotoPath>,
) -> ApiResult<ApiJson<PhotoReactionsResponse>> {
    let photo_id = path.photo_id()?;

    let service = ReactionService::new(state.service_context());
    let reactions = service
        .get_photo_reactions(&path.display_name, photo_id)
        .await?;
    Ok(ApiJson(reactions))
}

/// Change a reaction's kind
///
/// PUT /reactions/{display_name}/{photo_id}/{reactor_name}
pub async fn update_reaction(
    State(state): State<AppState>,
    Path(path): Path<ReactorPath>,
    ValidatedJson(request): ValidatedJson<UpdateReactionRequest>,
) -> ApiResult<ApiJson<ReactionResponse>> {
    let photo_id = path.photo_id()?;

    let service = ReactionService::new(state.service_context());
    let reaction = service
        .update_reaction(&path.display_name, photo_id, &path.reactor_name, request)
        .await?;
    Ok(ApiJson(reaction))
}

/// Remove a reaction
///
/// DELETE /reactions/{display_name}/{photo_id}/{reactor_name}
pub async fn delete_reaction(
    State(state): State<AppState>,
    Path(path): Path<ReactorPath>,
) -> ApiResult<NoContent> {
    let photo_id = path.photo_id()?;

    let service = ReactionService::new(state.service_context());
    service
        .delete_reaction(&path.display_name, photo_id, &path.reactor_name)
        .await?;
    Ok(NoContent)
}
