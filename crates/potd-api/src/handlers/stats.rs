//! Stats handlers

use axum::extract::{Path, State};
use potd_service::{PhotoStatsResponse, StatsService};

use crate::extractors::PhotoPath;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Aggregated reaction stats for a photo
///
/// GET /stats/{display_name}/{photo_id}
pub async fn get_photo_stats(
    State(state): State<AppState>,
    Path(path): Path<PhotoPath>,
) -> ApiResult<ApiJson<PhotoStatsResponse>> {
    let photo_id = path.photo_id()?;

    let service = StatsService::new(state.service_context());
    let stats = service
        .get_photo_stats(&path.display_name, photo_id)
        .await?;
    Ok(ApiJson(stats))
}
