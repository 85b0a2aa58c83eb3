//! Shared fixtures for scheduler integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tikus_common::MockClock;
use tikus_core::{InputBackend, MonitorLookup, MovementScheduler};
use tikus_domain::{
    IdleSample, MovementCommand, Point, Result, SchedulerConfig, SchedulerEvent, ScreenBounds,
};

/// In-memory cursor that follows applied commands
pub struct FakeInput {
    position: Mutex<Point>,
}

impl FakeInput {
    pub fn at(point: Point) -> Arc<Self> {
        Arc::new(Self { position: Mutex::new(point) })
    }

    pub fn position(&self) -> Point {
        *self.position.lock().unwrap()
    }
}

impl InputBackend for FakeInput {
    fn cursor_position(&self) -> Result<Point> {
        Ok(self.position())
    }

    fn move_cursor(&self, to: Point) -> Result<()> {
        *self.position.lock().unwrap() = to;
        Ok(())
    }

    fn idle_time(&self) -> Result<Duration> {
        Ok(Duration::ZERO)
    }
}

/// Two side-by-side monitors; points right of the seam belong to the second
pub struct DualMonitors;

pub const LEFT: ScreenBounds = ScreenBounds::new(0.0, 0.0, 1919.0, 1079.0);
pub const RIGHT: ScreenBounds = ScreenBounds::new(1920.0, 0.0, 3199.0, 1023.0);

impl MonitorLookup for DualMonitors {
    fn bounds_for(&self, point: Point) -> ScreenBounds {
        if point.x >= RIGHT.min_x {
            RIGHT
        } else {
            LEFT
        }
    }
}

/// Monday 2024-01-08 at the given time
pub fn monday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap().and_hms_opt(h, m, 0).unwrap()
}

/// Saturday 2024-01-13 at the given time
pub fn saturday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 13).unwrap().and_hms_opt(h, m, 0).unwrap()
}

pub fn idle(at: NaiveDateTime, millis: u64) -> IdleSample {
    IdleSample::new(at, Duration::from_millis(millis))
}

/// Scheduler on a single 1920x1080 screen with a seeded RNG
pub fn build(config: SchedulerConfig, input: Arc<FakeInput>) -> MovementScheduler {
    build_with(config, input, Arc::new(LEFT))
}

pub fn build_with(
    config: SchedulerConfig,
    input: Arc<FakeInput>,
    monitors: Arc<dyn MonitorLookup>,
) -> MovementScheduler {
    MovementScheduler::new(config, Arc::new(MockClock::starting_at(monday(12, 0))), monitors, input)
        .expect("valid config")
        .with_rng(StdRng::seed_from_u64(2024))
}

/// Tick and apply the command to the fake cursor, like the driver does
pub fn tick_and_apply(
    scheduler: &mut MovementScheduler,
    input: &FakeInput,
    now: NaiveDateTime,
) -> Option<MovementCommand> {
    let command = scheduler.tick(now)?;
    input.move_cursor(command.to).unwrap();
    Some(command)
}

pub fn count_started(events: &[SchedulerEvent]) -> usize {
    events.iter().filter(|e| matches!(e, SchedulerEvent::MovementStarted { .. })).count()
}
