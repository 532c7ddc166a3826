//! Selection of the best photo in a time window

use std::cmp::Ordering;

use crate::entities::StatsRecord;
use crate::value_objects::TimeWindow;

/// Pick the record with the highest total among those active in `window`.
///
/// Ties are broken by the lowest `(subject_id, item_id)` so the answer does
/// not depend on iteration order.
pub fn select_best<'a, I>(records: I, window: &TimeWindow) -> Option<&'a StatsRecord>
where
    I: IntoIterator<Item = &'a StatsRecord>,
{
    records
        .into_iter()
        .filter(|record| record.is_active_in(window))
        .min_by(|a, b| rank(a, b))
}

fn rank(a: &StatsRecord, b: &StatsRecord) -> Ordering {
    b.total
        .cmp(&a.total)
        .then_with(|| a.subject_id.cmp(&b.subject_id))
        .then_with(|| a.item_id.cmp(&b.item_id))
}
