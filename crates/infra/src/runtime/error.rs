//! Driver error types

use std::time::Duration;

use thiserror::Error;
use tikus_domain::TikusError;

/// Driver-specific errors
#[derive(Debug, Error)]
pub enum DriverError {
    /// Driver is already running
    #[error("Driver already running")]
    AlreadyRunning,

    /// Driver is not running
    #[error("Driver not running")]
    NotRunning,

    /// Operation timed out
    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Task join failed
    #[error("Task join failed: {0}")]
    TaskJoinFailed(String),

    /// The control inbox is gone
    #[error("Driver control channel closed")]
    ChannelClosed,

    /// The input backend failed and the session was stopped
    #[error("Input backend failed: {0}")]
    Backend(TikusError),
}

impl From<DriverError> for TikusError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::Backend(inner) => inner,
            DriverError::AlreadyRunning | DriverError::NotRunning => {
                TikusError::InvalidInput(err.to_string())
            }
            _ => TikusError::Internal(err.to_string()),
        }
    }
}

/// Convenience type alias for driver operations
pub type DriverResult<T> = Result<T, DriverError>;
