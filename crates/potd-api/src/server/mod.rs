//! Server setup and initialization
//!
//! Provides the application builder, store wiring and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use potd_common::{AppConfig, AppError, StorageBackend};
use potd_core::{AllowedReactions, PhotoDirectory, ReactionLogStore, StatsStore};
use potd_db::{
    create_pool, ensure_schema, DatabaseConfig, InMemoryReactionLogStore, InMemoryStatsStore,
    PgReactionLogStore, PgStatsStore,
};
use potd_service::{HttpPhotoDirectory, ServiceContextBuilder, UncheckedPhotoDirectory};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Create the reaction log and stats stores for the configured backend
async fn create_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn ReactionLogStore>, Arc<dyn StatsStore>), AppError> {
    match config.storage {
        StorageBackend::Postgres => {
            let db = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&DatabaseConfig::from(db))
                .await
                .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
            ensure_schema(&pool)
                .await
                .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
            info!("PostgreSQL connection established");

            Ok((
                Arc::new(PgReactionLogStore::new(pool.clone())),
                Arc::new(PgStatsStore::new(pool)),
            ))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; reactions are lost on restart");
            Ok((
                Arc::new(InMemoryReactionLogStore::new()),
                Arc::new(InMemoryStatsStore::new()),
            ))
        }
    }
}

/// Photo existence checks against the photo service, or none when unconfigured
fn create_photo_directory(config: &AppConfig) -> Result<Arc<dyn PhotoDirectory>, AppError> {
    match &config.photo_service.url {
        Some(url) => {
            let directory = HttpPhotoDirectory::new(url, config.photo_service.timeout())
                .map_err(|e| AppError::Config(e.to_string()))?;
            info!(url = %url, "Photo existence checks enabled");
            Ok(Arc::new(directory))
        }
        None => {
            warn!("PHOTO_SERVICE_URL not set; photo existence is not checked");
            Ok(Arc::new(UncheckedPhotoDirectory))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let (log_store, stats_store) = create_stores(&config).await?;
    let photos = create_photo_directory(&config)?;

    let service_context = ServiceContextBuilder::new()
        .log_store(log_store)
        .stats_store(stats_store)
        .photo_directory(photos)
        .allowed_reactions(AllowedReactions::new(config.reactions.allowed.iter()))
        .sync_config(config.sync.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    serve(listener, app).await
}

/// Run the complete server with configuration.
///
/// The startup resync completes before the listener is bound.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    // Create app state
    let state = create_app_state(config).await?;

    if state.config().sync.resync_on_startup {
        state.service_context().sync().run_startup_resync().await;
    } else {
        info!("Startup stats resync disabled");
    }

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
