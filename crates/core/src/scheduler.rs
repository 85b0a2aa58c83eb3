//! Idle/movement scheduler
//!
//! [`MovementScheduler`] is a synchronous state machine. It never sleeps or
//! spawns; a single driver feeds it idle samples and pause signals and calls
//! [`tick`](MovementScheduler::tick) at whatever cadence it likes. Every
//! `(state, signal)` pair has a defined outcome:
//!
//! | state      | genuine input      | idle ≥ timeout, gate open | gate closed          | pause  |
//! |------------|--------------------|---------------------------|----------------------|--------|
//! | Monitoring | restart idle count | → Moving (first move)     | stay                 | Paused |
//! | Moving     | → Monitoring       | move when interval is due | → Monitoring         | Paused |
//! | Paused     | reset frozen idle  | no movement               | no movement          | no-op  |

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tikus_common::Clock;
use tikus_domain::constants::ACTIVITY_RESET_THRESHOLD_MS;
use tikus_domain::{
    ConfigurationError, IdleSample, MovementCommand, SchedulerConfig, SchedulerEvent,
    SchedulerState, StatisticsSnapshot, StopReason,
};
use tracing::{debug, warn};

use crate::clamp::clamp;
use crate::gate::is_permitted;
use crate::interval::compute_interval;
use crate::patterns::{build_pattern, PatternGenerator};
use crate::ports::{InputBackend, MonitorLookup};

/// Drives the cursor while the user is away
pub struct MovementScheduler {
    config: SchedulerConfig,
    clock: Arc<dyn Clock>,
    monitors: Arc<dyn MonitorLookup>,
    input: Arc<dyn InputBackend>,
    rng: Box<dyn RngCore + Send>,

    state: SchedulerState,
    /// Idle time counted toward the timeout; frozen while paused
    idle: Duration,
    /// Raw idle reading last reported by the backend
    reading: Duration,
    /// Paused time still contained in the backend's readings
    pause_credit: Duration,
    /// Active generator; only present while moving
    pattern: Option<Box<dyn PatternGenerator>>,
    /// Earliest wall-clock time of the next move in this session
    next_move_at: Option<NaiveDateTime>,

    session_started: Instant,
    move_count: u64,
    total_distance: f64,
    events: Vec<SchedulerEvent>,
}

impl MovementScheduler {
    /// Create a scheduler in the `Monitoring` state
    ///
    /// The session clock starts now. Randomness comes from OS entropy unless
    /// replaced with [`with_rng`](Self::with_rng).
    ///
    /// # Errors
    /// Returns a [`ConfigurationError`] if `config` does not validate.
    pub fn new(
        config: SchedulerConfig,
        clock: Arc<dyn Clock>,
        monitors: Arc<dyn MonitorLookup>,
        input: Arc<dyn InputBackend>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let session_started = clock.now();
        Ok(Self {
            config,
            clock,
            monitors,
            input,
            rng: Box::new(StdRng::from_entropy()),
            state: SchedulerState::Monitoring,
            idle: Duration::ZERO,
            reading: Duration::ZERO,
            pause_credit: Duration::ZERO,
            pattern: None,
            next_move_at: None,
            session_started,
            move_count: 0,
            total_distance: 0.0,
            events: Vec::new(),
        })
    }

    /// Replace the randomness source
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Current state of the machine
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Idle time counted toward the timeout
    pub fn idle(&self) -> Duration {
        self.idle
    }

    /// Configuration the scheduler was built with
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Whether pause signals currently suppress movement
    pub fn is_paused(&self) -> bool {
        self.state == SchedulerState::Paused
    }

    /// Interval the adaptive policy currently prescribes
    pub fn current_interval(&self) -> Duration {
        compute_interval(self.idle, &self.config)
    }

    /// When the next move of the running session is due
    pub fn next_move_at(&self) -> Option<NaiveDateTime> {
        self.next_move_at
    }

    /// Record a new idle reading from the input backend
    ///
    /// A reading lower than the previous one, or below the activity threshold
    /// (never above the idle timeout), means the user touched the keyboard or
    /// mouse. That ends a running session. While paused only such resets are
    /// taken; growing readings are ignored so paused time does not count
    /// toward the timeout, and after resuming that paused span is deducted
    /// from the readings until the next genuine input.
    pub fn feed_activity(&mut self, sample: IdleSample) {
        let threshold =
            Duration::from_millis(ACTIVITY_RESET_THRESHOLD_MS).min(self.config.idle_timeout);
        let genuine_input = sample.idle < threshold || sample.idle < self.reading;
        self.reading = sample.idle;

        if genuine_input {
            self.pause_credit = Duration::ZERO;
        }

        match self.state {
            SchedulerState::Paused => {
                if genuine_input {
                    self.idle = sample.idle;
                }
            }
            SchedulerState::Moving if genuine_input => {
                debug!(idle = ?sample.idle, "genuine input detected, stopping movement");
                self.stop_session(StopReason::UserActivity);
                self.idle = sample.idle;
            }
            SchedulerState::Moving | SchedulerState::Monitoring => {
                self.idle = sample.idle.saturating_sub(self.pause_credit);
            }
        }
    }

    /// Pause or resume
    ///
    /// Pausing halts a running session immediately and keeps the current idle
    /// reading. Resuming returns to `Monitoring`; the next tick re-checks the
    /// timeout and the work-hours gate before moving again.
    pub fn set_paused(&mut self, paused: bool) {
        match (self.state, paused) {
            (SchedulerState::Paused, true)
            | (SchedulerState::Monitoring, false)
            | (SchedulerState::Moving, false) => {}
            (SchedulerState::Moving, true) => {
                self.stop_session(StopReason::Paused);
                self.enter_paused();
            }
            (SchedulerState::Monitoring, true) => self.enter_paused(),
            (SchedulerState::Paused, false) => {
                self.state = SchedulerState::Monitoring;
                self.pause_credit = self.reading.saturating_sub(self.idle);
                self.events.push(SchedulerEvent::Resumed);
                debug!(idle = ?self.idle, credit = ?self.pause_credit, "scheduler resumed");
            }
        }
    }

    /// Flip the pause flag, returning whether the scheduler is now paused
    pub fn toggle_pause(&mut self) -> bool {
        let paused = !self.is_paused();
        self.set_paused(paused);
        paused
    }

    /// End a running session without pausing
    ///
    /// Used by the driver when the backend could not apply a move.
    pub fn halt(&mut self, reason: StopReason) {
        if self.state == SchedulerState::Moving {
            self.stop_session(reason);
        }
    }

    /// Advance the state machine to `now`
    ///
    /// Yields at most one command. The transition tick into `Moving` emits
    /// the first move; after that a move is emitted whenever the adaptive
    /// interval has elapsed since the previous one.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<MovementCommand> {
        match self.state {
            SchedulerState::Paused => None,
            SchedulerState::Monitoring => {
                if self.idle < self.config.idle_timeout
                    || !is_permitted(now, &self.config.work_hours)
                {
                    return None;
                }
                self.start_session();
                self.step(now)
            }
            SchedulerState::Moving => {
                if !is_permitted(now, &self.config.work_hours) {
                    self.stop_session(StopReason::OutsideWorkHours);
                    return None;
                }
                match self.next_move_at {
                    Some(due) if now < due => None,
                    _ => self.step(now),
                }
            }
        }
    }

    /// Counters accumulated so far
    pub fn statistics(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            move_count: self.move_count,
            total_distance: self.total_distance,
            session_duration: self.clock.now().saturating_duration_since(self.session_started),
        }
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.events)
    }

    fn start_session(&mut self) {
        self.state = SchedulerState::Moving;
        self.pattern = Some(build_pattern(self.config.pattern, &self.config));
        self.next_move_at = None;
        self.events.push(SchedulerEvent::MovementStarted {
            pattern: self.config.pattern,
            idle_secs: self.idle.as_secs_f64(),
        });
        debug!(pattern = %self.config.pattern, idle = ?self.idle, "movement started");
    }

    fn stop_session(&mut self, reason: StopReason) {
        self.state = SchedulerState::Monitoring;
        self.pattern = None;
        self.next_move_at = None;
        self.events.push(SchedulerEvent::MovementStopped { reason });
        debug!(%reason, "movement stopped");
    }

    fn enter_paused(&mut self) {
        self.state = SchedulerState::Paused;
        self.events.push(SchedulerEvent::Paused);
        debug!(idle = ?self.idle, "scheduler paused");
    }

    fn step(&mut self, now: NaiveDateTime) -> Option<MovementCommand> {
        let interval = self.current_interval();
        let due = chrono::Duration::from_std(interval)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta));
        self.next_move_at = Some(due.unwrap_or_else(|| {
            warn!(?interval, "movement interval exceeds the calendar range, no further moves");
            NaiveDateTime::MAX
        }));

        let from = match self.input.cursor_position() {
            Ok(point) => point,
            Err(err) => {
                warn!(error = %err, "cursor position unavailable, skipping move");
                return None;
            }
        };

        let pattern = self.pattern.as_mut()?;
        let offset = pattern.advance(self.rng.as_mut());
        let bounds = self.monitors.bounds_for(from);
        let command = MovementCommand::new(from, clamp(from.offset_by(offset), bounds));

        let distance = command.distance();
        self.move_count += 1;
        self.total_distance += distance;
        self.events.push(SchedulerEvent::Moved { from: command.from, to: command.to, distance });

        Some(command)
    }
}

impl std::fmt::Debug for MovementScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovementScheduler")
            .field("state", &self.state)
            .field("idle", &self.idle)
            .field("pattern", &self.config.pattern)
            .field("next_move_at", &self.next_move_at)
            .field("move_count", &self.move_count)
            .finish_non_exhaustive()
    }
}
