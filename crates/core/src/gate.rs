//! Schedule gate

use chrono::{Datelike, NaiveDateTime};
use tikus_domain::WorkHours;

/// Whether the work-hours configuration permits movement at `now`
///
/// Always true when `work_hours.only` is off. Otherwise `now` must fall on a
/// configured weekday (0 = Monday) and inside `[start, end)`. The window never
/// wraps past midnight: with `end <= start` nothing is permitted.
pub fn is_permitted(now: NaiveDateTime, work_hours: &WorkHours) -> bool {
    if !work_hours.only {
        return true;
    }

    let weekday = now.weekday().num_days_from_monday() as u8;
    if !work_hours.days.contains(&weekday) {
        return false;
    }

    let time = now.time();
    work_hours.start <= time && time < work_hours.end
}
