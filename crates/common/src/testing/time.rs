//! Time abstraction for testability
//!
//! The scheduler needs two kinds of time: a monotonic instant for measuring
//! session duration, and a local wall-clock reading for work-hours gating.
//! [`Clock`] exposes both so production code uses [`SystemClock`] and tests
//! drive a [`MockClock`] pinned to a chosen calendar date.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "runtime")]
//! # {
//! use std::time::Duration;
//!
//! use chrono::NaiveDate;
//! use tikus_common::testing::{Clock, MockClock};
//!
//! let monday_nine = NaiveDate::from_ymd_opt(2024, 1, 8)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let clock = MockClock::starting_at(monday_nine);
//! clock.advance(Duration::from_secs(90));
//! assert_eq!(clock.local_now(), monday_nine + chrono::Duration::seconds(90));
//! # }
//! ```

// Test utilities panic on poisoned mutexes to fail tests early
#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};

/// Trait for time operations to enable testing
pub trait Clock: Send + Sync {
    /// Get current instant (monotonic time)
    fn now(&self) -> Instant;

    /// Get the current local wall-clock date and time
    ///
    /// Used for weekday and time-of-day decisions, so it is expressed in the
    /// user's local timezone without an offset.
    fn local_now(&self) -> NaiveDateTime;
}

/// Real system clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same elapsed time, so a test can hand one copy to the
/// code under test and advance another.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
    base_local: NaiveDateTime,
}

impl MockClock {
    /// Create a new mock clock anchored at the current local time
    pub fn new() -> Self {
        Self::starting_at(Local::now().naive_local())
    }

    /// Create a mock clock whose wall-clock reading starts at `local`
    pub fn starting_at(local: NaiveDateTime) -> Self {
        Self {
            start: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
            base_local: local,
        }
    }

    /// Advance the mock clock by a duration
    pub fn advance(&self, duration: Duration) {
        let mut elapsed = self.elapsed.lock().expect("mutex poisoned");
        *elapsed += duration;
    }

    /// Set the mock clock to a specific elapsed time
    pub fn set_elapsed(&self, duration: Duration) {
        let mut elapsed = self.elapsed.lock().expect("mutex poisoned");
        *elapsed = duration;
    }

    /// Get the current elapsed time
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().expect("mutex poisoned")
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn local_now(&self) -> NaiveDateTime {
        // Elapsed mock time stays far below chrono's range limits
        let elapsed =
            chrono::Duration::from_std(self.elapsed()).unwrap_or_else(|_| chrono::Duration::zero());
        self.base_local + elapsed
    }
}
