//! Route definitions

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{admin, health, photo_of_day, reactions, stats};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(reaction_routes())
        .merge(stats_routes())
        .merge(admin_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reactions/:display_name/:photo_id",
            post(reactions::add_reaction).get(reactions::get_photo_reactions),
        )
        .route(
            "/reactions/:display_name/:photo_id/:reactor_name",
            put(reactions::update_reaction).delete(reactions::delete_reaction),
        )
}

/// Stats and photo-of-the-day routes
fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/:display_name/:photo_id", get(stats::get_photo_stats))
        .route("/photo-of-day/stats", get(photo_of_day::get_photo_of_day))
}

/// Operator routes
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/resync", post(admin::resync))
}
