//! Reaction service
//!
//! Handles photo reactions (add, change, remove, list). Every mutation writes
//! the reaction log first, then hands the key to the synchronization
//! controller so the stats record is rebuilt before the call returns.

use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use potd_core::{DomainError, ItemKey, ReactionEvent};

use crate::dto::{AddReactionRequest, PhotoReactionsResponse, ReactionResponse, UpdateReactionRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const MAX_NAME_LEN: usize = 16;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a reaction to a photo
    #[instrument(skip(self, request), fields(actor_id = %request.reactor_name))]
    pub async fn add_reaction(
        &self,
        display_name: &str,
        photo_id: i64,
        request: AddReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        request.validate()?;
        let key = target(display_name, photo_id)?;
        let kind = self.ctx.allowed_reactions().parse(&request.reaction)?;

        self.ensure_photo_exists(&key).await?;

        let event = ReactionEvent::new(&key, request.reactor_name, kind, Utc::now());
        self.ctx.log_store().create(&event).await?;
        self.ctx.sync().on_reaction_created(&event).await?;

        Ok(ReactionResponse::from(event))
    }

    /// Change the kind of an existing reaction
    #[instrument(skip(self, request))]
    pub async fn update_reaction(
        &self,
        display_name: &str,
        photo_id: i64,
        reactor_name: &str,
        request: UpdateReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        request.validate()?;
        let key = target(display_name, photo_id)?;
        check_name("reactor_name", reactor_name)?;
        let kind = self.ctx.allowed_reactions().parse(&request.reaction)?;

        self.ensure_photo_exists(&key).await?;

        // Conditional write: a reaction deleted meanwhile stays deleted
        let (old_kind, event) = self
            .ctx
            .log_store()
            .update(&key, reactor_name, &kind, Utc::now())
            .await?;
        self.ctx
            .sync()
            .on_reaction_updated(&key, reactor_name, &old_kind, &event.kind)
            .await?;

        Ok(ReactionResponse::from(event))
    }

    /// Remove a reaction
    #[instrument(skip(self))]
    pub async fn delete_reaction(
        &self,
        display_name: &str,
        photo_id: i64,
        reactor_name: &str,
    ) -> ServiceResult<()> {
        let key = target(display_name, photo_id)?;
        check_name("reactor_name", reactor_name)?;

        self.ensure_photo_exists(&key).await?;

        if !self.ctx.log_store().delete(&key, reactor_name).await? {
            return Err(reaction_not_found(&key, reactor_name));
        }
        self.ctx
            .sync()
            .on_reaction_deleted(&key, reactor_name)
            .await?;

        Ok(())
    }

    /// All reactions on a photo, oldest first
    #[instrument(skip(self))]
    pub async fn get_photo_reactions(
        &self,
        display_name: &str,
        photo_id: i64,
    ) -> ServiceResult<PhotoReactionsResponse> {
        let key = target(display_name, photo_id)?;
        self.ensure_photo_exists(&key).await?;

        let events = self.ctx.log_store().list_for_item(&key).await?;
        let reactions: Vec<ReactionResponse> = events.iter().map(ReactionResponse::from).collect();

        Ok(PhotoReactionsResponse {
            display_name: key.subject_id,
            photo_id: key.item_id,
            total_reactions: reactions.len(),
            reactions,
        })
    }

    // === Helper Methods ===

    async fn ensure_photo_exists(&self, key: &ItemKey) -> ServiceResult<()> {
        if self.ctx.photos().photo_exists(key).await? {
            Ok(())
        } else {
            Err(DomainError::PhotoNotFound(key.clone()).into())
        }
    }
}

/// Validate path parameters and build the photo key
pub(crate) fn target(display_name: &str, photo_id: i64) -> ServiceResult<ItemKey> {
    check_name("display_name", display_name)?;
    if photo_id < 0 {
        return Err(ServiceError::validation("photo_id must be non-negative"));
    }
    Ok(ItemKey::new(display_name, photo_id))
}

fn check_name(field: &str, value: &str) -> ServiceResult<()> {
    let len = value.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ServiceError::validation(format!(
            "{field} must be 1-{MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn reaction_not_found(key: &ItemKey, actor_id: &str) -> ServiceError {
    DomainError::ReactionNotFound {
        key: key.clone(),
        actor_id: actor_id.to_string(),
    }
    .into()
}
