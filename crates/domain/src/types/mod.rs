//! Domain types for the movement scheduler

pub mod activity;
pub mod geometry;
pub mod state;
pub mod stats;

pub use activity::{IdleSample, MovementCommand};
pub use geometry::{Offset, Point, ScreenBounds};
pub use state::{PatternKind, SchedulerEvent, SchedulerState, StopReason, Verbosity};
pub use stats::StatisticsSnapshot;
