//! Activity samples and movement commands

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geometry::{Offset, Point};

/// Time elapsed since the last genuine user input, as observed at `at`
///
/// Produced continuously by the input backend. Backends must exclude their
/// own synthetic moves, otherwise every movement would look like activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleSample {
    /// Local wall-clock time of the observation
    pub at: NaiveDateTime,

    /// Idle duration reported by the backend
    pub idle: Duration,
}

impl IdleSample {
    pub const fn new(at: NaiveDateTime, idle: Duration) -> Self {
        Self { at, idle }
    }
}

/// One atomic cursor move from `from` to `to`
///
/// `to` has already been clamped to the monitor that contained `from`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementCommand {
    pub from: Point,
    pub to: Point,
}

impl MovementCommand {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Relative displacement actually applied
    pub fn delta(&self) -> Offset {
        self.from.delta_to(self.to)
    }

    /// Euclidean length of the move
    pub fn distance(&self) -> f64 {
        self.from.distance_to(self.to)
    }
}
