//! In-process input backend
//!
//! [`VirtualDesktop`] keeps a cursor position and a "last genuine input"
//! instant in memory. Moves applied through [`InputBackend::move_cursor`]
//! never touch the input instant, which is exactly the contract real backends
//! have to honour. The `--dry-run` mode runs the full driver against it.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tikus_common::Clock;
use tikus_core::InputBackend;
use tikus_domain::{Point, Result, TikusError};
use tracing::trace;

#[derive(Debug)]
struct DesktopState {
    cursor: Point,
    last_input: Instant,
    moves_applied: u64,
    reject_moves: bool,
}

/// Virtual cursor with a simulated idle source
pub struct VirtualDesktop {
    clock: Arc<dyn Clock>,
    state: Mutex<DesktopState>,
}

impl VirtualDesktop {
    /// Desktop with the cursor at `cursor` and the user active right now
    pub fn new(clock: Arc<dyn Clock>, cursor: Point) -> Self {
        let last_input = clock.now();
        Self {
            clock,
            state: Mutex::new(DesktopState {
                cursor,
                last_input,
                moves_applied: 0,
                reject_moves: false,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, DesktopState>> {
        self.state
            .lock()
            .map_err(|_| TikusError::Internal("virtual desktop state poisoned".to_string()))
    }

    /// Pretend the user touched the mouse or keyboard now
    pub fn simulate_input(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.last_input = self.clock.now();
        Ok(())
    }

    /// Pretend the user moved the pointer to `to`
    pub fn simulate_pointer(&self, to: Point) -> Result<()> {
        let mut state = self.lock()?;
        state.cursor = to;
        state.last_input = self.clock.now();
        Ok(())
    }

    /// Make subsequent moves fail, as a disconnected display would
    pub fn reject_moves(&self, reject: bool) -> Result<()> {
        self.lock()?.reject_moves = reject;
        Ok(())
    }

    /// Number of synthetic moves applied so far
    pub fn moves_applied(&self) -> u64 {
        self.lock().map(|s| s.moves_applied).unwrap_or(0)
    }
}

impl InputBackend for VirtualDesktop {
    fn cursor_position(&self) -> Result<Point> {
        Ok(self.lock()?.cursor)
    }

    fn move_cursor(&self, to: Point) -> Result<()> {
        let mut state = self.lock()?;
        if state.reject_moves {
            return Err(TikusError::Platform("virtual display rejected the move".to_string()));
        }
        trace!(x = to.x, y = to.y, "virtual cursor moved");
        state.cursor = to;
        state.moves_applied += 1;
        Ok(())
    }

    fn idle_time(&self) -> Result<Duration> {
        let last_input = self.lock()?.last_input;
        Ok(self.clock.now().saturating_duration_since(last_input))
    }
}
