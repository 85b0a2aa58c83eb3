//! Adaptive interval policy
//!
//! The longer the user has been away, the less often the cursor needs to
//! move. Thresholds and intervals come straight from configuration.

use std::time::Duration;

use tikus_domain::SchedulerConfig;

/// Movement interval for the given idle duration
///
/// With adaptive intervals disabled this is always `movement_interval`.
/// Otherwise idle time below the short threshold uses the short interval,
/// below the medium threshold the medium interval, and anything longer the
/// long interval.
pub fn compute_interval(idle: Duration, config: &SchedulerConfig) -> Duration {
    let adaptive = &config.adaptive;
    if !adaptive.enabled {
        return config.movement_interval;
    }

    if idle < adaptive.short.threshold {
        adaptive.short.interval
    } else if idle < adaptive.medium.threshold {
        adaptive.medium.interval
    } else {
        adaptive.long_interval
    }
}
