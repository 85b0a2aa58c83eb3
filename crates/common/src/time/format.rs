//! Human-readable duration formatting
//!
//! Status lines show idle progress and session length with whole-second
//! precision; hours are not rolled over into days.

use std::time::Duration;

use chrono::NaiveDateTime;

/// Format a duration as `"1h 2m 3s"`, `"2m 3s"` or `"3s"`
///
/// Leading zero components are dropped and sub-second precision is truncated.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "runtime")]
/// # {
/// use std::time::Duration;
///
/// use tikus_common::time::format::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(5)), "5s");
/// assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
/// assert_eq!(format_duration(Duration::from_secs(90_000)), "25h 0m 0s");
/// # }
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Format a wall-clock timestamp the way status banners print it
///
/// ```
/// # #[cfg(feature = "runtime")]
/// # {
/// use chrono::NaiveDate;
/// use tikus_common::time::format::format_timestamp;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(9, 5, 7).unwrap();
/// assert_eq!(format_timestamp(at), "09:05:07 - March 04, 2024");
/// # }
/// ```
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%H:%M:%S - %B %d, %Y").to_string()
}
