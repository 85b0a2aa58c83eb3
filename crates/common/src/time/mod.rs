//! Time utilities and abstractions
//!
//! - **Clock abstractions**: Real and mock time (re-exported from testing)
//! - **[`duration`]**: Parsing human-written durations (`"5m"`, `"1h 30m"`)
//! - **[`format`]**: Human-readable durations and timestamps for status logs
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "runtime")]
//! # {
//! use std::time::Duration;
//!
//! use tikus_common::time::{format_duration, parse_duration};
//!
//! assert_eq!(format_duration(Duration::from_secs(3665)), "1h 1m 5s");
//! assert_eq!(parse_duration("2h 30m").unwrap(), Duration::from_secs(9000));
//! # }
//! ```

pub mod duration;
pub mod format;

// Re-export commonly used items
pub use duration::{parse_duration, DurationParseError};
pub use format::{format_duration, format_timestamp};

// Re-export Clock abstractions from testing module
pub use crate::testing::time::{Clock, MockClock, SystemClock};
