//! Movement driver with explicit lifecycle management.
//!
//! [`MovementDriver`] moves a [`MovementScheduler`] onto a tokio task. Each
//! loop iteration samples the backend's idle time, feeds it to the scheduler,
//! ticks it, and applies any resulting command before sleeping until the next
//! poll or the next due move, whichever is sooner. Pause signals arrive
//! through an mpsc inbox, so the scheduler only ever has one caller.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tikus_common::SystemClock;
//! use tikus_core::MovementScheduler;
//! use tikus_domain::{Config, Point};
//! use tikus_infra::platform::{ConfiguredMonitors, VirtualDesktop};
//! use tikus_infra::runtime::{DriverResult, MovementDriver};
//!
//! # async fn example() -> DriverResult<()> {
//! let config = Config::default();
//! let clock = Arc::new(SystemClock);
//! let desktop = Arc::new(VirtualDesktop::new(clock.clone(), Point::new(960.0, 540.0)));
//! let monitors = Arc::new(ConfiguredMonitors::from_config(&config.scheduler));
//! let scheduler =
//!     MovementScheduler::new(config.scheduler.clone(), clock.clone(), monitors, desktop.clone())
//!         .expect("valid config");
//!
//! let mut driver = MovementDriver::new(scheduler, desktop, clock, (&config.runtime).into());
//! driver.start()?;
//! driver.handle().pause().await?;
//! let stats = driver.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tikus_common::time::format_duration;
use tikus_common::Clock;
use tikus_core::{InputBackend, MovementScheduler};
use tikus_domain::{
    IdleSample, RuntimeSettings, SchedulerEvent, SchedulerState, StatisticsSnapshot, StopReason,
    TikusError,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::runtime::error::{DriverError, DriverResult};

/// Capacity of the control inbox
const CONTROL_CHANNEL_CAPACITY: usize = 16;

/// Shortest sleep between iterations, even when a move is already due
const MIN_WAIT: Duration = Duration::from_millis(10);

/// Signals accepted by the driver's inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Pause,
    Resume,
    TogglePause,
}

/// Timing for the driver loop
#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// How often the backend's idle time is sampled
    pub poll_interval: Duration,
    /// How often idle progress is logged while monitoring
    pub status_interval: Duration,
    /// Timeout for awaiting the loop task on stop
    pub join_timeout: Duration,
}

impl Default for DriverSettings {
    fn default() -> Self {
        (&RuntimeSettings::default()).into()
    }
}

impl From<&RuntimeSettings> for DriverSettings {
    fn from(settings: &RuntimeSettings) -> Self {
        Self {
            poll_interval: settings.poll_interval,
            status_interval: settings.status_interval,
            join_timeout: Duration::from_secs(5),
        }
    }
}

/// Cloneable entry point for tray, hotkey and CLI collaborators
#[derive(Debug, Clone)]
pub struct DriverHandle {
    control_tx: mpsc::Sender<ControlSignal>,
    stats_rx: watch::Receiver<StatisticsSnapshot>,
    state_rx: watch::Receiver<SchedulerState>,
}

impl DriverHandle {
    pub async fn pause(&self) -> DriverResult<()> {
        self.send(ControlSignal::Pause).await
    }

    pub async fn resume(&self) -> DriverResult<()> {
        self.send(ControlSignal::Resume).await
    }

    pub async fn toggle_pause(&self) -> DriverResult<()> {
        self.send(ControlSignal::TogglePause).await
    }

    /// Statistics as of the last loop iteration
    pub fn statistics(&self) -> StatisticsSnapshot {
        *self.stats_rx.borrow()
    }

    /// Scheduler state as of the last loop iteration
    pub fn state(&self) -> SchedulerState {
        *self.state_rx.borrow()
    }

    async fn send(&self, signal: ControlSignal) -> DriverResult<()> {
        self.control_tx.send(signal).await.map_err(|_| DriverError::ChannelClosed)
    }
}

/// Everything the loop task owns; handed back to the driver on stop
struct DriverLoop {
    scheduler: MovementScheduler,
    input: Arc<dyn InputBackend>,
    clock: Arc<dyn Clock>,
    settings: DriverSettings,
    control_rx: mpsc::Receiver<ControlSignal>,
    stats_tx: watch::Sender<StatisticsSnapshot>,
    state_tx: watch::Sender<SchedulerState>,
    last_status: tokio::time::Instant,
    failure: Option<TikusError>,
}

/// Movement driver with explicit lifecycle management
pub struct MovementDriver {
    parked: Option<DriverLoop>,
    handle: DriverHandle,
    join_timeout: Duration,
    task_handle: Option<JoinHandle<DriverLoop>>,
    cancellation: CancellationToken,
}

impl MovementDriver {
    /// Create a stopped driver around `scheduler`
    pub fn new(
        scheduler: MovementScheduler,
        input: Arc<dyn InputBackend>,
        clock: Arc<dyn Clock>,
        settings: DriverSettings,
    ) -> Self {
        let (control_tx, control_rx) = mpsc::channel(CONTROL_CHANNEL_CAPACITY);
        let (stats_tx, stats_rx) = watch::channel(scheduler.statistics());
        let (state_tx, state_rx) = watch::channel(scheduler.state());

        Self {
            join_timeout: settings.join_timeout,
            parked: Some(DriverLoop {
                scheduler,
                input,
                clock,
                settings,
                control_rx,
                stats_tx,
                state_tx,
                last_status: tokio::time::Instant::now(),
                failure: None,
            }),
            handle: DriverHandle { control_tx, stats_rx, state_rx },
            task_handle: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Handle for sending pause signals and reading statistics
    pub fn handle(&self) -> DriverHandle {
        self.handle.clone()
    }

    /// Token cancelled when the running loop ends, including after a backend
    /// failure. Each `start` issues a fresh token, so fetch it afterwards.
    pub fn stopped_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Spawn the loop task. Must be called inside a tokio runtime.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> DriverResult<()> {
        if self.task_handle.is_some() {
            return Err(DriverError::AlreadyRunning);
        }
        let mut driver_loop = self.parked.take().ok_or(DriverError::AlreadyRunning)?;

        self.cancellation = CancellationToken::new();
        driver_loop.last_status = tokio::time::Instant::now();
        driver_loop.failure = None;

        let cancel = self.cancellation.clone();
        self.task_handle = Some(tokio::spawn(driver_loop.run(cancel)));
        info!("Movement driver started");
        Ok(())
    }

    /// Stop the loop, wait for it and log the session summary.
    ///
    /// Returns the final statistics, or the backend error that ended the loop.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> DriverResult<StatisticsSnapshot> {
        let handle = self.task_handle.take().ok_or(DriverError::NotRunning)?;
        self.cancellation.cancel();

        let join_timeout = self.join_timeout;
        let mut driver_loop = tokio::time::timeout(join_timeout, handle)
            .await
            .map_err(|_| DriverError::Timeout { duration: join_timeout })?
            .map_err(|e| DriverError::TaskJoinFailed(e.to_string()))?;

        let stats = driver_loop.scheduler.statistics();
        driver_loop.stats_tx.send_replace(stats);
        log_session_summary(&stats);

        let failure = driver_loop.failure.take();
        self.parked = Some(driver_loop);
        self.cancellation = CancellationToken::new();
        info!("Movement driver stopped");

        match failure {
            Some(err) => Err(DriverError::Backend(err)),
            None => Ok(stats),
        }
    }

    /// Returns true when the loop task is active
    pub fn is_running(&self) -> bool {
        self.task_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for MovementDriver {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("MovementDriver dropped while running; cancelling loop");
            self.cancellation.cancel();
        }
    }
}

impl DriverLoop {
    async fn run(mut self, cancel: CancellationToken) -> Self {
        loop {
            if let Err(err) = self.iterate() {
                error!(error = %err, "Input backend failed; stopping movement");
                self.failure = Some(err);
                cancel.cancel();
                break;
            }

            let wait = self.next_wait();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Driver loop cancelled");
                    break;
                }
                Some(signal) = self.control_rx.recv() => self.apply(signal),
                _ = tokio::time::sleep(wait) => {}
            }
        }
        self
    }

    /// One sample-tick-apply round. Only a failed move is fatal.
    fn iterate(&mut self) -> Result<(), TikusError> {
        let now = self.clock.local_now();
        match self.input.idle_time() {
            Ok(idle) => self.scheduler.feed_activity(IdleSample::new(now, idle)),
            Err(err) => warn!(error = %err, "Could not read idle time"),
        }

        let outcome = match self.scheduler.tick(now) {
            Some(command) => self.input.move_cursor(command.to).map_err(|err| {
                self.scheduler.halt(StopReason::BackendFailure);
                err
            }),
            None => Ok(()),
        };

        self.flush_events();
        self.report_status();
        outcome
    }

    fn apply(&mut self, signal: ControlSignal) {
        match signal {
            ControlSignal::Pause => self.scheduler.set_paused(true),
            ControlSignal::Resume => self.scheduler.set_paused(false),
            ControlSignal::TogglePause => {
                self.scheduler.toggle_pause();
            }
        }
        self.flush_events();
    }

    /// Sleep until the next poll, or sooner if a move falls due first
    fn next_wait(&self) -> Duration {
        let poll = self.settings.poll_interval;
        if self.scheduler.state() != SchedulerState::Moving {
            return poll;
        }
        match self.scheduler.next_move_at() {
            Some(due) => {
                let until = (due - self.clock.local_now()).to_std().unwrap_or(Duration::ZERO);
                until.min(poll).max(MIN_WAIT)
            }
            None => poll,
        }
    }

    fn flush_events(&mut self) {
        for event in self.scheduler.drain_events() {
            log_event(&event);
        }
        self.stats_tx.send_replace(self.scheduler.statistics());
        self.state_tx.send_replace(self.scheduler.state());
    }

    /// Periodic idle-progress line while waiting for the timeout
    fn report_status(&mut self) {
        if self.last_status.elapsed() < self.settings.status_interval {
            return;
        }
        self.last_status = tokio::time::Instant::now();

        match self.scheduler.state() {
            SchedulerState::Monitoring => {
                let idle = self.scheduler.idle();
                let timeout = self.scheduler.config().idle_timeout;
                let progress = if timeout.is_zero() {
                    100.0
                } else {
                    (idle.as_secs_f64() / timeout.as_secs_f64() * 100.0).min(100.0)
                };
                info!(
                    idle = %format_duration(idle),
                    timeout = %format_duration(timeout),
                    progress_pct = format_args!("{progress:.0}"),
                    remaining = %format_duration(timeout.saturating_sub(idle)),
                    "Monitoring for inactivity"
                );
            }
            SchedulerState::Moving => {
                let stats = self.scheduler.statistics();
                debug!(
                    moves = stats.move_count,
                    interval = %format_duration(self.scheduler.current_interval()),
                    "Movement active"
                );
            }
            SchedulerState::Paused => debug!("Movement paused"),
        }
    }
}

fn log_event(event: &SchedulerEvent) {
    match event {
        SchedulerEvent::MovementStarted { pattern, idle_secs } => info!(
            pattern = %pattern,
            idle = %format_duration(Duration::from_secs_f64(*idle_secs)),
            "Starting automatic movement"
        ),
        SchedulerEvent::Moved { from, to, distance } => debug!(
            from_x = from.x.round(),
            from_y = from.y.round(),
            to_x = to.x.round(),
            to_y = to.y.round(),
            distance = format_args!("{distance:.1}"),
            "Cursor moved"
        ),
        SchedulerEvent::MovementStopped { reason } => {
            info!(reason = %reason, "Automatic movement stopped")
        }
        SchedulerEvent::Paused => info!("Movement paused"),
        SchedulerEvent::Resumed => info!("Movement resumed"),
    }
}

fn log_session_summary(stats: &StatisticsSnapshot) {
    info!(
        moves = stats.move_count,
        total_distance = format_args!("{:.1}", stats.total_distance),
        average_distance = format_args!("{:.1}", stats.average_distance()),
        session = %format_duration(stats.session_duration),
        "Session statistics"
    );
}
