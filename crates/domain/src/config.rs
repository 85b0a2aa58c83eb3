//! Configuration model
//!
//! [`Config`] is what the loader deserializes; [`SchedulerConfig`] is the
//! immutable part handed to the scheduler. Every section derives `Default`
//! with the shipped values so partial files are accepted, and
//! [`SchedulerConfig::validate`] rejects anything the movement loop could not
//! act on.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tikus_common::{duration_secs, time_of_day};

use crate::constants::*;
use crate::errors::ConfigurationError;
use crate::types::{PatternKind, ScreenBounds, Verbosity};

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scheduler: SchedulerConfig,
    pub runtime: RuntimeSettings,
}

impl Config {
    /// Validate every section
    ///
    /// # Errors
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.scheduler.validate()?;
        self.runtime.validate()
    }
}

/* -------------------------------------------------------------------------- */
/* Scheduler */
/* -------------------------------------------------------------------------- */

/// Everything the movement scheduler reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Idle time before automatic movement starts
    #[serde(with = "duration_secs")]
    pub idle_timeout: Duration,

    /// Base interval between moves when adaptive intervals are off
    #[serde(with = "duration_secs")]
    pub movement_interval: Duration,

    /// Maximum single-step displacement for the random pattern, in pixels
    pub movement_range: f64,

    pub pattern: PatternKind,

    pub adaptive: AdaptiveIntervals,

    pub work_hours: WorkHours,

    /// One rectangle per monitor; empty means a single default display
    pub screen_bounds: Vec<ScreenBounds>,

    pub patterns: PatternSettings,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            movement_interval: Duration::from_millis(DEFAULT_MOVEMENT_INTERVAL_MS),
            movement_range: DEFAULT_MOVEMENT_RANGE_PX,
            pattern: PatternKind::default(),
            adaptive: AdaptiveIntervals::default(),
            work_hours: WorkHours::default(),
            screen_bounds: Vec::new(),
            patterns: PatternSettings::default(),
        }
    }
}

impl SchedulerConfig {
    /// Builder starting from the defaults
    pub fn builder() -> SchedulerConfigBuilder {
        SchedulerConfigBuilder::default()
    }

    /// Configured monitors, or the default display when none are listed
    pub fn monitors(&self) -> Vec<ScreenBounds> {
        if self.screen_bounds.is_empty() {
            vec![ScreenBounds::from_origin_size(
                0.0,
                0.0,
                DEFAULT_SCREEN_WIDTH,
                DEFAULT_SCREEN_HEIGHT,
            )]
        } else {
            self.screen_bounds.clone()
        }
    }

    /// Check the configuration once, before any scheduler is built
    ///
    /// # Errors
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        non_negative("movement_range", self.movement_range)?;

        if self.adaptive.short.threshold > self.adaptive.medium.threshold {
            return Err(ConfigurationError::InvertedIdleBands {
                short: self.adaptive.short.threshold,
                medium: self.adaptive.medium.threshold,
            });
        }

        self.work_hours.validate()?;

        for (index, bounds) in self.screen_bounds.iter().enumerate() {
            for value in [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y] {
                if !value.is_finite() {
                    return Err(ConfigurationError::NegativeOrNonFinite {
                        field: "screen_bounds",
                        value,
                    });
                }
            }
            if !bounds.is_ordered() {
                return Err(ConfigurationError::InvertedMonitorBounds { index });
            }
        }

        self.patterns.validate()
    }
}

/// Builder for [`SchedulerConfig`], starting from the defaults
#[derive(Debug, Default)]
pub struct SchedulerConfigBuilder {
    config: SchedulerConfig,
}

impl SchedulerConfigBuilder {
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    pub fn movement_interval(mut self, interval: Duration) -> Self {
        self.config.movement_interval = interval;
        self
    }

    pub fn movement_range(mut self, range: f64) -> Self {
        self.config.movement_range = range;
        self
    }

    pub fn pattern(mut self, pattern: PatternKind) -> Self {
        self.config.pattern = pattern;
        self
    }

    pub fn adaptive(mut self, adaptive: AdaptiveIntervals) -> Self {
        self.config.adaptive = adaptive;
        self
    }

    /// Disable adaptive intervals so every move waits `movement_interval`
    pub fn fixed_interval(mut self) -> Self {
        self.config.adaptive.enabled = false;
        self
    }

    pub fn work_hours(mut self, work_hours: WorkHours) -> Self {
        self.config.work_hours = work_hours;
        self
    }

    pub fn screen_bounds(mut self, bounds: Vec<ScreenBounds>) -> Self {
        self.config.screen_bounds = bounds;
        self
    }

    pub fn patterns(mut self, patterns: PatternSettings) -> Self {
        self.config.patterns = patterns;
        self
    }

    /// Validate and return the configuration
    ///
    /// # Errors
    /// Returns a [`ConfigurationError`] if validation fails.
    pub fn build(self) -> Result<SchedulerConfig, ConfigurationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Idle-band thresholds and the interval used inside each band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveIntervals {
    pub enabled: bool,
    pub short: IdleBand,
    pub medium: IdleBand,
    /// Interval once idle time passes the medium threshold
    #[serde(with = "duration_secs")]
    pub long_interval: Duration,
}

impl Default for AdaptiveIntervals {
    fn default() -> Self {
        Self {
            enabled: true,
            short: IdleBand {
                threshold: Duration::from_secs(DEFAULT_SHORT_IDLE_THRESHOLD_SECS),
                interval: Duration::from_secs(DEFAULT_SHORT_IDLE_INTERVAL_SECS),
            },
            medium: IdleBand {
                threshold: Duration::from_secs(DEFAULT_MEDIUM_IDLE_THRESHOLD_SECS),
                interval: Duration::from_secs(DEFAULT_MEDIUM_IDLE_INTERVAL_SECS),
            },
            long_interval: Duration::from_secs(DEFAULT_LONG_IDLE_INTERVAL_SECS),
        }
    }
}

/// Idle times below `threshold` move every `interval`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleBand {
    #[serde(with = "duration_secs")]
    pub threshold: Duration,
    #[serde(with = "duration_secs")]
    pub interval: Duration,
}

/// Work-hours window
///
/// The window is literal: `start <= t < end`. An `end` earlier than `start`
/// does not wrap past midnight, so such a window never permits movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkHours {
    /// Restrict movement to the window
    pub only: bool,
    #[serde(with = "time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end: NaiveTime,
    /// Weekdays, 0 = Monday through 6 = Sunday
    pub days: BTreeSet<u8>,
}

impl Default for WorkHours {
    fn default() -> Self {
        let (start_h, start_m) = DEFAULT_WORK_START;
        let (end_h, end_m) = DEFAULT_WORK_END;
        Self {
            only: false,
            start: NaiveTime::from_hms_opt(start_h, start_m, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(end_h, end_m, 0).unwrap_or(NaiveTime::MIN),
            days: DEFAULT_WORK_DAYS.into_iter().collect(),
        }
    }
}

impl WorkHours {
    /// Window restricted to the given weekdays and times
    pub fn restricted(start: NaiveTime, end: NaiveTime, days: impl IntoIterator<Item = u8>) -> Self {
        Self { only: true, start, end, days: days.into_iter().collect() }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.days.is_empty() {
            return Err(ConfigurationError::EmptyWorkDays);
        }
        if let Some(&day) = self.days.iter().find(|&&d| d > 6) {
            return Err(ConfigurationError::InvalidWeekday(day));
        }
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */
/* Pattern parameters */
/* -------------------------------------------------------------------------- */

/// Per-pattern parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSettings {
    pub circle: CircleSettings,
    pub figure8: Figure8Settings,
    pub smooth: SmoothSettings,
    pub jiggle: JiggleSettings,
    pub human: HumanSettings,
}

impl PatternSettings {
    fn validate(&self) -> Result<(), ConfigurationError> {
        non_negative("patterns.circle.radius", self.circle.radius)?;
        non_negative("patterns.figure8.width", self.figure8.width)?;
        non_negative("patterns.figure8.height", self.figure8.height)?;
        non_negative("patterns.smooth.amplitude", self.smooth.amplitude)?;
        non_negative("patterns.smooth.frequency", self.smooth.frequency)?;
        non_negative("patterns.jiggle.max_distance", self.jiggle.max_distance)?;
        non_negative("patterns.human.min_distance", self.human.min_distance)?;
        non_negative("patterns.human.max_distance", self.human.max_distance)?;

        if self.human.min_distance > self.human.max_distance {
            return Err(ConfigurationError::InvertedDistanceRange {
                min: self.human.min_distance,
                max: self.human.max_distance,
            });
        }
        if !(0.0..=1.0).contains(&self.human.acceleration) {
            return Err(ConfigurationError::AccelerationOutOfRange(self.human.acceleration));
        }
        Ok(())
    }
}

/// Circle pattern parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleSettings {
    pub radius: f64,
    pub steps: u32,
}

impl Default for CircleSettings {
    fn default() -> Self {
        Self { radius: DEFAULT_CIRCLE_RADIUS, steps: DEFAULT_CIRCLE_STEPS }
    }
}

/// Figure-8 pattern parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Figure8Settings {
    pub width: f64,
    pub height: f64,
    pub steps: u32,
}

impl Default for Figure8Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIGURE8_WIDTH,
            height: DEFAULT_FIGURE8_HEIGHT,
            steps: DEFAULT_FIGURE8_STEPS,
        }
    }
}

/// Smooth wave parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothSettings {
    pub amplitude: f64,
    /// Radians advanced per step
    pub frequency: f64,
}

impl Default for SmoothSettings {
    fn default() -> Self {
        Self { amplitude: DEFAULT_SMOOTH_AMPLITUDE, frequency: DEFAULT_SMOOTH_FREQUENCY }
    }
}

/// Jiggle pattern parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiggleSettings {
    pub max_distance: f64,
}

impl Default for JiggleSettings {
    fn default() -> Self {
        Self { max_distance: DEFAULT_JIGGLE_MAX_DISTANCE }
    }
}

/// Human-like stroke parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanSettings {
    pub min_distance: f64,
    pub max_distance: f64,
    /// Fraction of the gap to the new target distance closed per step
    pub acceleration: f64,
}

impl Default for HumanSettings {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_HUMAN_MIN_DISTANCE,
            max_distance: DEFAULT_HUMAN_MAX_DISTANCE,
            acceleration: DEFAULT_HUMAN_ACCELERATION,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Runtime */
/* -------------------------------------------------------------------------- */

/// Settings for the driver loop and console output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// How often idle progress is logged while monitoring
    #[serde(with = "duration_secs")]
    pub status_interval: Duration,

    /// How often the backend's idle time is sampled
    #[serde(with = "duration_secs")]
    pub poll_interval: Duration,

    pub verbosity: Verbosity,

    pub enable_pause_hotkey: bool,

    /// Chord such as `ctrl+shift+p`
    pub pause_hotkey: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            status_interval: Duration::from_secs(DEFAULT_STATUS_INTERVAL_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            verbosity: Verbosity::default(),
            enable_pause_hotkey: true,
            pause_hotkey: DEFAULT_PAUSE_HOTKEY.to_string(),
        }
    }
}

impl RuntimeSettings {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigurationError::InvalidValue {
                field: "runtime.poll_interval",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.enable_pause_hotkey && self.pause_hotkey.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                field: "runtime.pause_hotkey",
                reason: "must not be empty while the hotkey is enabled".to_string(),
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NegativeOrNonFinite { field, value })
    }
}
