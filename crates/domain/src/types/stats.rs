//! Session statistics

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Read-only view of the scheduler's counters
///
/// Counters only grow while the scheduler is moving; the session duration is
/// measured from scheduler construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// Number of movement commands emitted
    pub move_count: u64,

    /// Sum of Euclidean lengths of all emitted moves, in pixels
    pub total_distance: f64,

    /// Time since the session started
    pub session_duration: Duration,
}

impl StatisticsSnapshot {
    /// Mean distance per move, zero before the first move
    pub fn average_distance(&self) -> f64 {
        if self.move_count == 0 {
            0.0
        } else {
            self.total_distance / self.move_count as f64
        }
    }
}
