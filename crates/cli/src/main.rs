//! tikus: activity-adaptive cursor keep-alive.
//!
//! Loads the configuration, layers the command-line flags on top, and runs
//! the movement driver until Ctrl+C or a backend failure.

mod args;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tikus_common::time::{format_duration, format_timestamp};
use tikus_common::{Clock, SystemClock};
use tikus_core::{InputBackend, MovementScheduler};
use tikus_domain::{Config, Point, ScreenBounds};
use tikus_infra::config;
use tikus_infra::hotkey::Hotkey;
use tikus_infra::platform::{ConfiguredMonitors, VirtualDesktop};
use tikus_infra::runtime::MovementDriver;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.clone()).context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;
    logging::init(config.runtime.verbosity, cli.log_format)?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    log_startup(&config, clock.as_ref(), cli.dry_run);

    let hotkey = if config.runtime.enable_pause_hotkey {
        let parsed: Hotkey =
            config.runtime.pause_hotkey.parse().context("invalid pause hotkey")?;
        Some(parsed)
    } else {
        None
    };

    let monitors = Arc::new(ConfiguredMonitors::from_config(&config.scheduler));
    let input = select_backend(cli.dry_run, clock.clone(), monitors.monitors());
    let scheduler =
        MovementScheduler::new(config.scheduler.clone(), clock.clone(), monitors, input.clone())
            .context("invalid scheduler configuration")?;

    let mut driver = MovementDriver::new(scheduler, input, clock, (&config.runtime).into());
    driver.start()?;

    let watchers = CancellationToken::new();
    spawn_hotkey_watcher(hotkey, &driver, &watchers);

    let stopped = driver.stopped_token();
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("Interrupt received, shutting down");
        }
        _ = stopped.cancelled() => warn!("Movement driver stopped unexpectedly"),
    }

    watchers.cancel();
    driver.stop().await?;
    Ok(())
}

fn log_startup(config: &Config, clock: &dyn Clock, dry_run: bool) {
    let s = &config.scheduler;
    info!(
        started = %format_timestamp(clock.local_now()),
        dry_run,
        "Tikus starting"
    );
    info!(
        pattern = %s.pattern,
        idle_timeout = %format_duration(s.idle_timeout),
        movement_interval = ?s.movement_interval,
        movement_range = s.movement_range,
        adaptive = s.adaptive.enabled,
        "Movement settings"
    );
    if s.work_hours.only {
        info!(
            start = %s.work_hours.start.format("%H:%M"),
            end = %s.work_hours.end.format("%H:%M"),
            days = ?s.work_hours.days,
            "Movement restricted to work hours"
        );
    }
    for (index, bounds) in s.monitors().iter().enumerate() {
        info!(
            index,
            width = bounds.width(),
            height = bounds.height(),
            min_x = bounds.min_x,
            min_y = bounds.min_y,
            "Monitor"
        );
    }
}

/// Pick the input backend for this run
fn select_backend(
    dry_run: bool,
    clock: Arc<dyn Clock>,
    monitors: &[ScreenBounds],
) -> Arc<dyn InputBackend> {
    let notice = backend_notice(dry_run, cfg!(feature = "device-query"));
    if dry_run {
        info!("{notice}");
    } else {
        warn!("{notice}");
    }

    #[cfg(feature = "device-query")]
    {
        if !dry_run {
            return Arc::new(tikus_infra::platform::DeviceQueryBackend::new());
        }
    }

    let start = monitors.first().map_or_else(Point::default, ScreenBounds::center);
    Arc::new(VirtualDesktop::new(clock, start))
}

/// What the chosen backend does to the real cursor
fn backend_notice(dry_run: bool, device_query: bool) -> &'static str {
    match (dry_run, device_query) {
        (true, _) => "Dry run: driving a virtual cursor, the real cursor is never moved",
        (false, true) => {
            "Using device_query input backend: it reads idle time and the cursor \
             but cannot move it, so moves are logged and the real cursor stays put"
        }
        (false, false) => {
            "Built without the device-query feature: driving a virtual cursor, \
             the real cursor is never moved"
        }
    }
}

#[cfg(feature = "device-query")]
fn spawn_hotkey_watcher(
    hotkey: Option<Hotkey>,
    driver: &MovementDriver,
    cancel: &CancellationToken,
) {
    if let Some(hotkey) = hotkey {
        tokio::spawn(tikus_infra::platform::watch_hotkey(hotkey, driver.handle(), cancel.clone()));
    }
}

#[cfg(not(feature = "device-query"))]
fn spawn_hotkey_watcher(
    hotkey: Option<Hotkey>,
    _driver: &MovementDriver,
    _cancel: &CancellationToken,
) {
    if let Some(hotkey) = hotkey {
        info!(hotkey = %hotkey, "Pause hotkey needs the device-query feature; ignoring");
    }
}
