//! Serialization utilities for configuration values
//!
//! Configuration files express durations as (possibly fractional) seconds and
//! times of day as `"HH:MM"` strings. These modules keep that representation
//! at the serde boundary while the rest of the workspace works with
//! [`Duration`] and [`NaiveTime`].

use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Serde serialization result type
type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

/// Custom serialization module for Duration as fractional seconds
///
/// Negative, NaN and infinite values are rejected during deserialization, so a
/// config struct using this module can never hold a negative interval.
///
/// # Usage
/// ```rust
/// use std::time::Duration;
///
/// use serde::{Deserialize, Serialize};
/// use tikus_common::duration_secs;
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(with = "duration_secs")]
///     interval: Duration,
/// }
/// ```
pub mod duration_secs {
    use super::{Deserialize, Deserializer, Duration, SerializeResult, Serializer};

    /// Serialize a Duration as seconds (f64)
    pub fn serialize<S>(duration: &Duration, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    /// Deserialize seconds (f64) into a Duration
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(format!(
                "expected a non-negative number of seconds, got {secs}"
            ))
        })
    }
}

/// Parse a time of day written as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
/// Returns the underlying chrono parse error when neither format matches.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

/// Custom serialization module for `NaiveTime` as an `"HH:MM"` string
///
/// Seconds are accepted on input (`"09:00:30"`) but only written back when
/// they are non-zero.
pub mod time_of_day {
    use chrono::Timelike;

    use super::{
        parse_time_of_day, Deserialize, Deserializer, NaiveTime, SerializeResult, Serializer,
    };

    /// Serialize a `NaiveTime` as `HH:MM` (or `HH:MM:SS`)
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        let formatted = if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        };
        serializer.serialize_str(&formatted)
    }

    /// Deserialize an `HH:MM` string into a `NaiveTime`
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_time_of_day(&raw).map_err(|e| {
            serde::de::Error::custom(format!("invalid time of day '{raw}' (expected HH:MM): {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Window {
        #[serde(with = "duration_secs")]
        interval: Duration,
        #[serde(with = "time_of_day")]
        start: NaiveTime,
    }

    #[test]
    fn test_fractional_seconds_deserialize() {
        let json = r#"{"interval":0.5,"start":"09:00"}"#;
        let window: Window = serde_json::from_str(json).expect("valid window");

        assert_eq!(window.interval, Duration::from_millis(500));
        assert_eq!(window.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_integer_seconds_from_toml() {
        let window: Window =
            toml::from_str("interval = 300\nstart = \"18:30\"").expect("valid toml window");

        assert_eq!(window.interval, Duration::from_secs(300));
        assert_eq!(window.start, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
    }

    #[test]
    fn test_negative_seconds_rejected() {
        let json = r#"{"interval":-1.0,"start":"09:00"}"#;
        let err = serde_json::from_str::<Window>(json).unwrap_err();
        assert!(err.to_string().contains("non-negative"), "unexpected error: {err}");
    }

    #[test]
    fn test_invalid_time_rejected() {
        let json = r#"{"interval":1,"start":"25:99"}"#;
        assert!(serde_json::from_str::<Window>(json).is_err());

        let json = r#"{"interval":1,"start":"nine"}"#;
        assert!(serde_json::from_str::<Window>(json).is_err());
    }

    #[test]
    fn test_time_with_seconds_written_back() {
        let window = Window {
            interval: Duration::from_secs(2),
            start: NaiveTime::from_hms_opt(7, 5, 30).unwrap(),
        };
        let json = serde_json::to_string(&window).unwrap();
        assert!(json.contains("\"07:05:30\""));

        let on_the_minute =
            Window { interval: Duration::ZERO, start: NaiveTime::from_hms_opt(7, 5, 0).unwrap() };
        let json = serde_json::to_string(&on_the_minute).unwrap();
        assert!(json.contains("\"07:05\""));
    }
}
