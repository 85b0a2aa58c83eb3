//! Port interfaces for the movement scheduler
//!
//! These traits define the boundary between the scheduler and the platform
//! code that reads real input and moves the real cursor.

use std::time::Duration;

use tikus_domain::{Point, Result, ScreenBounds};

/// Reads and drives the system pointer
///
/// Implementations must keep their own synthetic moves out of
/// [`idle_time`](InputBackend::idle_time). The scheduler treats any drop in
/// reported idle time as genuine user input and ends the session.
pub trait InputBackend: Send + Sync {
    /// Current cursor position on the virtual desktop
    fn cursor_position(&self) -> Result<Point>;

    /// Move the cursor to `to` as one atomic operation
    fn move_cursor(&self, to: Point) -> Result<()>;

    /// Time since the last genuine keyboard or mouse input
    fn idle_time(&self) -> Result<Duration>;
}

/// Picks the monitor whose bounds apply to a clamp
pub trait MonitorLookup: Send + Sync {
    /// Bounds of the monitor that owns `point`
    fn bounds_for(&self, point: Point) -> ScreenBounds;
}

/// A single rectangle owns every point
impl MonitorLookup for ScreenBounds {
    fn bounds_for(&self, _point: Point) -> ScreenBounds {
        *self
    }
}
