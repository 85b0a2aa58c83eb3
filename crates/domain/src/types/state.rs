//! Scheduler state, pattern selection and emitted events

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::impl_named_enum_conversions;

/// Finite-state-machine variable of the movement scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    /// Tracking idle time, not moving (initial state)
    #[default]
    Monitoring,
    /// Idle timeout reached and the schedule permits movement
    Moving,
    /// Halted by the user; no movement is ever emitted
    Paused,
}

impl_named_enum_conversions!(SchedulerState {
    Monitoring => "monitoring",
    Moving => "moving",
    Paused => "paused",
});

/// Movement pattern algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Random,
    Circle,
    Figure8,
    Smooth,
    Jiggle,
    Human,
}

impl_named_enum_conversions!(PatternKind {
    Random => "random",
    Circle => "circle",
    Figure8 => "figure8",
    Smooth => "smooth",
    Jiggle => "jiggle",
    Human => "human",
});

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Random,
        PatternKind::Circle,
        PatternKind::Figure8,
        PatternKind::Smooth,
        PatternKind::Jiggle,
        PatternKind::Human,
    ];
}

/// Console verbosity of the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl_named_enum_conversions!(Verbosity {
    Quiet => "quiet",
    Normal => "normal",
    Verbose => "verbose",
});

/// Why a movement session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Genuine input arrived from the user
    UserActivity,
    /// The user paused the scheduler
    Paused,
    /// The work-hours window closed
    OutsideWorkHours,
    /// The input backend refused a move
    BackendFailure,
}

impl_named_enum_conversions!(StopReason {
    UserActivity => "user_activity",
    Paused => "paused",
    OutsideWorkHours => "outside_work_hours",
    BackendFailure => "backend_failure",
});

/// Observable transitions and moves, drained by the runtime for logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedulerEvent {
    MovementStarted { pattern: PatternKind, idle_secs: f64 },
    Moved { from: Point, to: Point, distance: f64 },
    MovementStopped { reason: StopReason },
    Paused,
    Resumed,
}
