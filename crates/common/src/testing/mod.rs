//! Testing utilities and helpers
//!
//! - **[`assertions`]**: Numeric and duration assertions for geometry tests
//! - **[`time`]**: Clock abstraction with a controllable mock
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "runtime")]
//! # {
//! use tikus_common::testing::{assert_approx_eq, MockClock};
//!
//! let clock = MockClock::new();
//! clock.advance(std::time::Duration::from_secs(5));
//! assert_approx_eq(clock.elapsed().as_secs_f64(), 5.0, 1e-9);
//! # }
//! ```

pub mod assertions;
pub mod time;

pub use assertions::{assert_approx_eq, assert_duration_in_range, assert_point_within};
pub use time::{Clock, MockClock, SystemClock};
