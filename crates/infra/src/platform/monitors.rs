//! Monitor lookup over the configured screen rectangles

use tikus_core::MonitorLookup;
use tikus_domain::constants::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use tikus_domain::{Point, SchedulerConfig, ScreenBounds};

/// [`MonitorLookup`] backed by a fixed list of monitors
///
/// The monitor containing the point wins; a point on no monitor (a cursor
/// reported in a gap between screens) belongs to the nearest one.
#[derive(Debug, Clone)]
pub struct ConfiguredMonitors {
    monitors: Vec<ScreenBounds>,
}

impl ConfiguredMonitors {
    /// Lookup over `monitors`; an empty list falls back to the default display
    pub fn new(monitors: Vec<ScreenBounds>) -> Self {
        if monitors.is_empty() {
            return Self::from_config(&SchedulerConfig::default());
        }
        Self { monitors }
    }

    /// Lookup over the monitors a scheduler configuration lists
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self { monitors: config.monitors() }
    }

    /// Monitors in configuration order
    pub fn monitors(&self) -> &[ScreenBounds] {
        &self.monitors
    }
}

impl MonitorLookup for ConfiguredMonitors {
    fn bounds_for(&self, point: Point) -> ScreenBounds {
        if let Some(bounds) = self.monitors.iter().find(|b| b.contains(point)) {
            return *bounds;
        }
        self.monitors
            .iter()
            .copied()
            .min_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)))
            .unwrap_or_else(|| {
                ScreenBounds::from_origin_size(0.0, 0.0, DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
            })
    }
}
