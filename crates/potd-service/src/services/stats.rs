//! Stats service
//!
//! Read side: per-photo stats and the photo of the day. Also exposes the
//! on-demand full resync.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use validator::Validate;

use potd_core::DomainError;

use crate::dto::{PhotoOfDayQuery, PhotoOfDayResponse, PhotoStatsResponse, WinningPhotoResponse};
use crate::sync::ResyncReport;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::period::resolve_period;
use super::reaction::target;

/// Stats service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregated stats for one photo
    #[instrument(skip(self))]
    pub async fn get_photo_stats(
        &self,
        display_name: &str,
        photo_id: i64,
    ) -> ServiceResult<PhotoStatsResponse> {
        let key = target(display_name, photo_id)?;
        let record = self
            .ctx
            .queries()
            .query_stats(&key)
            .await?
            .ok_or(DomainError::StatsNotFound(key))?;

        Ok(PhotoStatsResponse::from(&record))
    }

    /// Most-reacted photo in the requested period
    pub async fn photo_of_day(&self, query: PhotoOfDayQuery) -> ServiceResult<PhotoOfDayResponse> {
        self.photo_of_day_at(query, Utc::now()).await
    }

    /// Same as `photo_of_day`, with an explicit reference time for `days` lookbacks
    #[instrument(skip(self))]
    pub async fn photo_of_day_at(
        &self,
        query: PhotoOfDayQuery,
        now: DateTime<Utc>,
    ) -> ServiceResult<PhotoOfDayResponse> {
        query.validate()?;
        let period = resolve_period(&query, now)?;

        info!(period = %period.description, "Looking up photo of the day");

        let best = self
            .ctx
            .queries()
            .query_best_in_window(&period.window)
            .await?;

        Ok(match best {
            Some(record) => {
                PhotoOfDayResponse::found(WinningPhotoResponse::from(&record), period.to_response())
            }
            None => PhotoOfDayResponse::not_found(period.to_response()),
        })
    }

    /// Rebuild the whole stats projection from the reaction log
    pub async fn resync(&self) -> ServiceResult<ResyncReport> {
        Ok(self.ctx.sync().full_resync().await?)
    }
}
