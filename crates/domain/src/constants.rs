//! Application constants
//!
//! Defaults mirror the shipped configuration file; every value here can be
//! overridden through config or the command line.

// Scheduler defaults
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MOVEMENT_INTERVAL_MS: u64 = 500;
pub const DEFAULT_MOVEMENT_RANGE_PX: f64 = 100.0;

/// Idle readings at or below this count as fresh genuine input
pub const ACTIVITY_RESET_THRESHOLD_MS: u64 = 1_000;

// Adaptive interval bands
pub const DEFAULT_SHORT_IDLE_THRESHOLD_SECS: u64 = 600;
pub const DEFAULT_SHORT_IDLE_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_MEDIUM_IDLE_THRESHOLD_SECS: u64 = 1_800;
pub const DEFAULT_MEDIUM_IDLE_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_LONG_IDLE_INTERVAL_SECS: u64 = 120;

// Work hours (Monday..Friday, 09:00-18:00)
pub const DEFAULT_WORK_START: (u32, u32) = (9, 0);
pub const DEFAULT_WORK_END: (u32, u32) = (18, 0);
pub const DEFAULT_WORK_DAYS: [u8; 5] = [0, 1, 2, 3, 4];

// Pattern parameters
pub const DEFAULT_CIRCLE_RADIUS: f64 = 50.0;
pub const DEFAULT_CIRCLE_STEPS: u32 = 20;
pub const DEFAULT_FIGURE8_WIDTH: f64 = 100.0;
pub const DEFAULT_FIGURE8_HEIGHT: f64 = 80.0;
pub const DEFAULT_FIGURE8_STEPS: u32 = 30;
pub const DEFAULT_SMOOTH_AMPLITUDE: f64 = 50.0;
pub const DEFAULT_SMOOTH_FREQUENCY: f64 = 0.1;
pub const DEFAULT_JIGGLE_MAX_DISTANCE: f64 = 10.0;
pub const DEFAULT_HUMAN_MIN_DISTANCE: f64 = 20.0;
pub const DEFAULT_HUMAN_MAX_DISTANCE: f64 = 150.0;
pub const DEFAULT_HUMAN_ACCELERATION: f64 = 0.3;

// Runtime
pub const DEFAULT_STATUS_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_PAUSE_HOTKEY: &str = "ctrl+shift+p";

/// Fallback monitor used when no screen bounds are configured
pub const DEFAULT_SCREEN_WIDTH: f64 = 1920.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 1080.0;
