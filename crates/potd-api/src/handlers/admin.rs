//! Operator endpoints

use axum::extract::State;
use potd_service::{ResyncReport, StatsService};
use tracing::info;

use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Rebuild every stats record from the reaction log
///
/// POST /admin/resync
pub async fn resync(State(state): State<AppState>) -> ApiResult<ApiJson<ResyncReport>> {
    info!("Stats resync requested");

    let service = StatsService::new(state.service_context());
    let report = service.resync().await?;
    Ok(ApiJson(report))
}
