//! Photo of the day handler

use axum::{extract::State, http::StatusCode, Json};
use potd_service::{PhotoOfDayQuery, PhotoOfDayResponse, StatsService};

use crate::extractors::ValidatedQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// Most-reacted photo over a period
///
/// GET /photo-of-day/stats?days=&start_date=&end_date=
///
/// An empty period answers 404 with `found: false` and the resolved period.
pub async fn get_photo_of_day(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PhotoOfDayQuery>,
) -> ApiResult<(StatusCode, Json<PhotoOfDayResponse>)> {
    let service = StatsService::new(state.service_context());
    let response = service.photo_of_day(query).await?;

    let status = if response.found {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(response)))
}
