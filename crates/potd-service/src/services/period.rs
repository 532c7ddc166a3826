//! Photo-of-the-day period resolution

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use potd_core::TimeWindow;

use crate::dto::{PeriodResponse, PhotoOfDayQuery};

use super::error::{ServiceError, ServiceResult};

const DEFAULT_DAYS: u32 = 1;
const MAX_DAYS: u32 = 365;

/// A validated query window plus its human-readable description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub window: TimeWindow,
    pub description: String,
}

impl ResolvedPeriod {
    pub fn to_response(&self) -> PeriodResponse {
        PeriodResponse {
            start: self.window.start(),
            end: self.window.end(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Resolve the period a photo-of-the-day query asks for.
///
/// Explicit `start_date` and `end_date` win when both are given; otherwise the
/// window covers the last `days` days (default 1) up to `now`.
pub fn resolve_period(query: &PhotoOfDayQuery, now: DateTime<Utc>) -> ServiceResult<ResolvedPeriod> {
    if let (Some(start_raw), Some(end_raw)) = (&query.start_date, &query.end_date) {
        let start = parse_bound(start_raw, Bound::Start)?;
        let end = parse_bound(end_raw, Bound::End)?;
        if start >= end {
            return Err(ServiceError::validation("start_date must be before end_date"));
        }
        return Ok(ResolvedPeriod {
            window: TimeWindow::new(start, end)?,
            description: format!("from {start_raw} to {end_raw}"),
        });
    }

    let days = query.days.unwrap_or(DEFAULT_DAYS);
    if !(1..=MAX_DAYS).contains(&days) {
        return Err(ServiceError::validation(format!(
            "days must be between 1 and {MAX_DAYS}"
        )));
    }

    Ok(ResolvedPeriod {
        window: TimeWindow::last_days(now, days)?,
        description: format!("last {days} day(s)"),
    })
}

/// Accepts RFC 3339, a naive datetime (taken as UTC) or a bare date
fn parse_bound(raw: &str, bound: Bound) -> ServiceResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => date.and_hms_opt(0, 0, 0),
            Bound::End => date.and_hms_opt(23, 59, 59),
        };
        if let Some(naive) = time {
            return Ok(naive.and_utc());
        }
    }

    Err(ServiceError::validation(format!("Invalid date format: {raw}")))
}
