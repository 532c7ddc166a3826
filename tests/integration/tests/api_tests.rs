//! API Integration Tests
//!
//! Each test starts its own in-process server on an ephemeral port with the
//! in-memory storage backend, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{
    assert_json, assert_status, fixtures::*, test_config, MockPhotoService, TestServer,
};
use potd_core::{ItemKey, StatsStore};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_add_reaction() {
    let server = TestServer::start().await.unwrap();
    let request = AddReaction::unique("coeur");

    let response = server.post("/reactions/john/5", &request).await.unwrap();
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let reaction: Reaction = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(reaction.display_name, "john");
    assert_eq!(reaction.photo_id, 5);
    assert_eq!(reaction.reactor_name, request.reactor_name);
    assert_eq!(reaction.reaction, "coeur");
    assert_eq!(reaction.created_at, reaction.updated_at);
    assert_eq!(
        location.as_deref(),
        Some(format!("/reactions/john/5/{}", request.reactor_name).as_str())
    );
}

#[tokio::test]
async fn test_add_duplicate_reaction() {
    let server = TestServer::start().await.unwrap();
    let request = AddReaction::new("hcartier", "coeur");

    server.post("/reactions/john/5", &request).await.unwrap();

    let response = server
        .post("/reactions/john/5", &AddReaction::new("hcartier", "fire"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "REACTION_ALREADY_EXISTS");

    // The first reaction is untouched
    let response = server.get("/stats/john/5").await.unwrap();
    let stats: PhotoStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.breakdown.get("coeur"), Some(&1));
}

#[tokio::test]
async fn test_add_reaction_validation() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/reactions/john/5",
            &AddReaction::new("a-name-far-longer-than-sixteen", "coeur"),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");

    let response = server
        .post("/reactions/john/5", &AddReaction::new("hcartier", "meh"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_REACTION_KIND");
    let allowed = body.error.details.unwrap()["allowed"].clone();
    assert!(allowed.as_array().unwrap().iter().any(|k| k == "coeur"));

    let response = server.get("/reactions/john/-1").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_list_photo_reactions() {
    let server = TestServer::start().await.unwrap();

    for (reactor, kind) in [("ada", "coeur"), ("brassai", "fire"), ("capa", "coeur")] {
        let response = server
            .post("/reactions/john/5", &AddReaction::new(reactor, kind))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.get("/reactions/john/5").await.unwrap();
    let list: PhotoReactions = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.display_name, "john");
    assert_eq!(list.photo_id, 5);
    assert_eq!(list.total_reactions, 3);
    assert_eq!(list.reactions[0].reactor_name, "ada");

    // A photo nobody reacted to has an empty list
    let response = server.get("/reactions/john/6").await.unwrap();
    let list: PhotoReactions = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.total_reactions, 0);
}

#[tokio::test]
async fn test_update_reaction() {
    let server = TestServer::start().await.unwrap();
    server
        .post("/reactions/john/5", &AddReaction::new("hcartier", "coeur"))
        .await
        .unwrap();

    let response = server
        .put("/reactions/john/5/hcartier", &UpdateReaction::new("fire"))
        .await
        .unwrap();
    let reaction: Reaction = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reaction.reaction, "fire");
    assert!(reaction.updated_at >= reaction.created_at);

    let response = server.get("/stats/john/5").await.unwrap();
    let stats: PhotoStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.breakdown.get("fire"), Some(&1));
    assert!(!stats.breakdown.contains_key("coeur"));
}

#[tokio::test]
async fn test_update_missing_reaction() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put("/reactions/john/5/nobody", &UpdateReaction::new("fire"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_REACTION");
}

#[tokio::test]
async fn test_delete_reaction() {
    let server = TestServer::start().await.unwrap();
    server
        .post("/reactions/john/5", &AddReaction::new("hcartier", "coeur"))
        .await
        .unwrap();

    let response = server.delete("/reactions/john/5/hcartier").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Last reaction gone, so the stats record is gone too
    let response = server.get("/stats/john/5").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_STATS");

    let response = server.delete("/reactions/john/5/hcartier").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Stats Tests
// ============================================================================

#[tokio::test]
async fn test_photo_stats_breakdown() {
    let server = TestServer::start().await.unwrap();
    for (reactor, kind) in [("ada", "coeur"), ("brassai", "coeur"), ("capa", "wow")] {
        server
            .post("/reactions/vivian/12", &AddReaction::new(reactor, kind))
            .await
            .unwrap();
    }

    let response = server.get("/stats/vivian/12").await.unwrap();
    let stats: PhotoStats = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.display_name, "vivian");
    assert_eq!(stats.photo_id, 12);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.breakdown.get("coeur"), Some(&2));
    assert_eq!(stats.breakdown.get("wow"), Some(&1));
    assert_eq!(stats.breakdown.values().sum::<i64>(), stats.total);
    assert!(stats.first_reaction_at <= stats.last_reaction_at);
}

// ============================================================================
// Photo of the Day Tests
// ============================================================================

#[tokio::test]
async fn test_photo_of_day_picks_most_reacted() {
    let server = TestServer::start().await.unwrap();

    for reactor in ["ada", "brassai", "capa"] {
        server
            .post("/reactions/john/5", &AddReaction::new(reactor, "coeur"))
            .await
            .unwrap();
    }
    server
        .post("/reactions/vivian/12", &AddReaction::new("ada", "fire"))
        .await
        .unwrap();

    let response = server.get("/photo-of-day/stats").await.unwrap();
    let potd: PhotoOfDay = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(potd.found);
    assert!(potd.message.is_none());
    let photo = potd.photo.unwrap();
    assert_eq!(photo.display_name, "john");
    assert_eq!(photo.photo_id, 5);
    assert_eq!(photo.reactions.total, 3);
    assert_eq!(photo.reactions.breakdown.get("coeur"), Some(&3));
    assert_eq!(potd.period.description, "last 1 day(s)");
    assert!(potd.period.start < potd.period.end);
}

#[tokio::test]
async fn test_photo_of_day_tie_goes_to_lowest_key() {
    let server = TestServer::start().await.unwrap();

    server
        .post("/reactions/zoe/1", &AddReaction::new("ada", "coeur"))
        .await
        .unwrap();
    server
        .post("/reactions/anna/9", &AddReaction::new("ada", "coeur"))
        .await
        .unwrap();
    server
        .post("/reactions/anna/3", &AddReaction::new("ada", "coeur"))
        .await
        .unwrap();

    let response = server.get("/photo-of-day/stats?days=7").await.unwrap();
    let potd: PhotoOfDay = assert_json(response, StatusCode::OK).await.unwrap();
    let photo = potd.photo.unwrap();
    assert_eq!(photo.display_name, "anna");
    assert_eq!(photo.photo_id, 3);
}

#[tokio::test]
async fn test_photo_of_day_explicit_dates() {
    let server = TestServer::start().await.unwrap();
    server
        .post("/reactions/john/5", &AddReaction::new("ada", "coeur"))
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let start = (today - Duration::days(1)).format("%Y-%m-%d").to_string();
    let end = (today + Duration::days(1)).format("%Y-%m-%d").to_string();

    let response = server
        .get(&format!("/photo-of-day/stats?start_date={start}&end_date={end}"))
        .await
        .unwrap();
    let potd: PhotoOfDay = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(potd.found);
    assert_eq!(potd.period.description, format!("from {start} to {end}"));

    // A window that ended long ago finds nothing
    let response = server
        .get("/photo-of-day/stats?start_date=2001-01-01&end_date=2001-01-31")
        .await
        .unwrap();
    let potd: PhotoOfDay = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert!(!potd.found);
    assert!(potd.photo.is_none());
    assert_eq!(
        potd.message.as_deref(),
        Some("No photo found for from 2001-01-01 to 2001-01-31")
    );
}

#[tokio::test]
async fn test_photo_of_day_rejects_bad_periods() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get("/photo-of-day/stats?start_date=2025-02-01&end_date=2025-01-01")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get("/photo-of-day/stats?start_date=yesterday&end_date=2025-01-01")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/photo-of-day/stats?days=366").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Resync Tests
// ============================================================================

#[tokio::test]
async fn test_resync_rebuilds_lost_stats() {
    let server = TestServer::start().await.unwrap();
    for reactor in ["ada", "brassai"] {
        server
            .post("/reactions/john/5", &AddReaction::new(reactor, "coeur"))
            .await
            .unwrap();
    }

    // Drop the projection behind the service's back
    let removed = server
        .state
        .service_context()
        .stats_store()
        .delete(&ItemKey::new("john", 5))
        .await
        .unwrap();
    assert!(removed);

    let response = server.get("/stats/john/5").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.post_empty("/admin/resync").await.unwrap();
    let report: ResyncReport = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.events_scanned, 2);
    assert_eq!(report.synced, 1);
    assert_eq!(report.pruned, 0);
    assert_eq!(report.failed, 0);

    let response = server.get("/stats/john/5").await.unwrap();
    let stats: PhotoStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total, 2);
}

// ============================================================================
// Photo Service Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_photo_rejected() {
    let photos = MockPhotoService::start(&[("john", 5)]).await.unwrap();
    let config = test_config(&[("PHOTO_SERVICE_URL", &photos.base_url())]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let response = server
        .post("/reactions/john/5", &AddReaction::new("ada", "coeur"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/reactions/john/6", &AddReaction::new("ada", "coeur"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_PHOTO");
}

#[tokio::test]
async fn test_photo_service_down() {
    // Nothing listens on this port once the listener is dropped
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let config = test_config(&[("PHOTO_SERVICE_URL", &format!("http://{addr}"))]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let response = server
        .post("/reactions/john/5", &AddReaction::new("ada", "coeur"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
    assert_eq!(body.error.code, "PHOTO_SERVICE_UNAVAILABLE");
}
