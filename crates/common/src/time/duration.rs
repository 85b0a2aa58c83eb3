//! Duration parsing from strings
//!
//! Accepts bare seconds (`"300"`, `"0.5"`) as well as unit-suffixed
//! components (`"5m"`, `"1h 30m"`, `"1m30s"`), so command-line overrides can
//! use whichever form is convenient.

use std::time::Duration;

use thiserror::Error;

/// Error type for duration parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("Empty duration string")]
    EmptyString,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Duration out of range: {0}")]
    OutOfRange(String),
}

/// Parse a duration string into a Duration
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "runtime")]
/// # {
/// use std::time::Duration;
///
/// use tikus_common::time::duration::parse_duration;
///
/// assert_eq!(parse_duration("300").unwrap(), Duration::from_secs(300));
/// assert_eq!(parse_duration("0.5s").unwrap(), Duration::from_millis(500));
/// assert_eq!(parse_duration("1h 30m").unwrap(), Duration::from_secs(5400));
/// # }
/// ```
///
/// # Errors
/// Returns a [`DurationParseError`] for empty input, malformed numbers,
/// unknown units, or values that do not fit in a `Duration`.
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DurationParseError::EmptyString);
    }

    // Bare number means seconds
    if let Ok(secs) = s.parse::<f64>() {
        return seconds(secs, s);
    }

    let mut total = Duration::ZERO;
    let mut number = String::new();
    let mut unit = String::new();
    // A number followed by whitespace must be followed by its unit
    let mut number_closed = false;

    for ch in s.chars().chain(std::iter::once(' ')) {
        if ch.is_ascii_digit() || ch == '.' {
            if !unit.is_empty() {
                total += component(&number, &unit)?;
                number.clear();
                unit.clear();
            } else if number_closed {
                return Err(DurationParseError::UnknownUnit(format!("missing unit after {number}")));
            }
            number.push(ch);
        } else if ch.is_whitespace() {
            if !unit.is_empty() {
                total += component(&number, &unit)?;
                number.clear();
                unit.clear();
                number_closed = false;
            } else if !number.is_empty() {
                number_closed = true;
            }
        } else {
            number_closed = false;
            unit.push(ch);
        }
    }

    if !number.is_empty() {
        return Err(DurationParseError::UnknownUnit(format!("missing unit after {number}")));
    }

    Ok(total)
}

fn component(number: &str, unit: &str) -> Result<Duration, DurationParseError> {
    if number.is_empty() {
        return Err(DurationParseError::InvalidNumber(format!("expected number before {unit}")));
    }
    let value: f64 =
        number.parse().map_err(|_| DurationParseError::InvalidNumber(number.to_string()))?;

    let multiplier = match unit {
        "ms" => 0.001,
        "s" | "sec" | "secs" => 1.0,
        "m" | "min" | "mins" => 60.0,
        "h" | "hr" | "hrs" => 3600.0,
        other => return Err(DurationParseError::UnknownUnit(other.to_string())),
    };

    seconds(value * multiplier, number)
}

fn seconds(secs: f64, raw: &str) -> Result<Duration, DurationParseError> {
    Duration::try_from_secs_f64(secs).map_err(|_| DurationParseError::OutOfRange(raw.to_string()))
}
