//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tikus
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TikusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Tikus operations
pub type Result<T> = std::result::Result<T, TikusError>;

/// Reasons a configuration is refused at construction time
///
/// Everything the scheduler consumes is validated once, up front; nothing in
/// the movement loop re-checks these conditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    NegativeOrNonFinite { field: &'static str, value: f64 },

    #[error("work_hours.days must contain at least one weekday")]
    EmptyWorkDays,

    #[error("work_hours.days contains {0}, expected 0 (Monday) through 6 (Sunday)")]
    InvalidWeekday(u8),

    #[error("adaptive short threshold ({short:?}) exceeds medium threshold ({medium:?})")]
    InvertedIdleBands { short: std::time::Duration, medium: std::time::Duration },

    #[error("human pattern min_distance ({min}) exceeds max_distance ({max})")]
    InvertedDistanceRange { min: f64, max: f64 },

    #[error("human pattern acceleration must be within [0, 1] (got {0})")]
    AccelerationOutOfRange(f64),

    #[error("monitor {index} has inverted bounds")]
    InvertedMonitorBounds { index: usize },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<ConfigurationError> for TikusError {
    fn from(err: ConfigurationError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_maps_to_config_variant() {
        let err: TikusError = ConfigurationError::EmptyWorkDays.into();
        assert!(matches!(err, TikusError::Config(ref msg) if msg.contains("work_hours.days")));
    }

    #[test]
    fn error_serializes_with_tag() {
        let json = serde_json::to_string(&TikusError::Platform("no display".into())).unwrap();
        assert_eq!(json, r#"{"type":"Platform","message":"no display"}"#);
    }
}
