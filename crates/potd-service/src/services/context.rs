//! Service context - dependency container for services
//!
//! Holds the stores, the photo directory and the synchronization machinery.
//! Built once at startup and shared by every request.

use std::sync::Arc;

use potd_common::SyncConfig;
use potd_core::{AllowedReactions, PhotoDirectory, ReactionLogStore, StatsStore};

use crate::query::WindowQueryEngine;
use crate::sync::{RetryPolicy, SyncController};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Stores
    log_store: Arc<dyn ReactionLogStore>,
    stats_store: Arc<dyn StatsStore>,

    // Collaborators
    photos: Arc<dyn PhotoDirectory>,

    // Configuration
    allowed_reactions: Arc<AllowedReactions>,

    // Stats synchronization and reads
    sync: Arc<SyncController>,
    queries: WindowQueryEngine,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        log_store: Arc<dyn ReactionLogStore>,
        stats_store: Arc<dyn StatsStore>,
        photos: Arc<dyn PhotoDirectory>,
        allowed_reactions: AllowedReactions,
        sync_config: &SyncConfig,
    ) -> Self {
        let sync = Arc::new(SyncController::new(
            Arc::clone(&log_store),
            Arc::clone(&stats_store),
            RetryPolicy::from_config(sync_config),
        ));
        let queries = WindowQueryEngine::new(Arc::clone(&stats_store), sync_config.query_timeout());

        Self {
            log_store,
            stats_store,
            photos,
            allowed_reactions: Arc::new(allowed_reactions),
            sync,
            queries,
        }
    }

    // === Stores ===

    /// Get the reaction log store
    pub fn log_store(&self) -> &dyn ReactionLogStore {
        self.log_store.as_ref()
    }

    /// Get the stats store (read access; writes go through `sync()`)
    pub fn stats_store(&self) -> &dyn StatsStore {
        self.stats_store.as_ref()
    }

    // === Collaborators ===

    /// Get the photo directory
    pub fn photos(&self) -> &dyn PhotoDirectory {
        self.photos.as_ref()
    }

    /// Get the allowed reaction kinds
    pub fn allowed_reactions(&self) -> &AllowedReactions {
        &self.allowed_reactions
    }

    // === Synchronization ===

    /// Get the synchronization controller
    pub fn sync(&self) -> &SyncController {
        &self.sync
    }

    /// Get the window query engine
    pub fn queries(&self) -> &WindowQueryEngine {
        &self.queries
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("stores", &"...")
            .field("allowed_reactions", &self.allowed_reactions)
            .field("sync", &self.sync)
            .field("queries", &self.queries)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    log_store: Option<Arc<dyn ReactionLogStore>>,
    stats_store: Option<Arc<dyn StatsStore>>,
    photos: Option<Arc<dyn PhotoDirectory>>,
    allowed_reactions: Option<AllowedReactions>,
    sync_config: Option<SyncConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_store(mut self, store: Arc<dyn ReactionLogStore>) -> Self {
        self.log_store = Some(store);
        self
    }

    pub fn stats_store(mut self, store: Arc<dyn StatsStore>) -> Self {
        self.stats_store = Some(store);
        self
    }

    pub fn photo_directory(mut self, photos: Arc<dyn PhotoDirectory>) -> Self {
        self.photos = Some(photos);
        self
    }

    pub fn allowed_reactions(mut self, allowed: AllowedReactions) -> Self {
        self.allowed_reactions = Some(allowed);
        self
    }

    pub fn sync_config(mut self, config: SyncConfig) -> Self {
        self.sync_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let log_store = self
            .log_store
            .ok_or_else(|| ServiceError::validation("log_store is required"))?;
        let stats_store = self
            .stats_store
            .ok_or_else(|| ServiceError::validation("stats_store is required"))?;
        let photos = self
            .photos
            .ok_or_else(|| ServiceError::validation("photo_directory is required"))?;

        let allowed = self.allowed_reactions.unwrap_or_default();
        if allowed.is_empty() {
            return Err(ServiceError::validation(
                "at least one reaction kind must be allowed",
            ));
        }

        Ok(ServiceContext::new(
            log_store,
            stats_store,
            photos,
            allowed,
            &self.sync_config.unwrap_or_default(),
        ))
    }
}
