//! Real pointer and keyboard access through `device_query`
//!
//! `device_query` can read the pointer, buttons and keys but cannot move the
//! cursor. [`DeviceQueryBackend`] therefore runs in observe mode: moves are
//! recorded and logged, and idle time is derived by diffing successive device
//! snapshots. A pointer position equal to the last recorded target is not
//! counted as input, so an external injector following the commands would not
//! cancel its own session.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use device_query::{DeviceQuery, DeviceState, Keycode};
use tikus_core::InputBackend;
use tikus_domain::{Point, Result, TikusError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::hotkey::Hotkey;
use crate::runtime::DriverHandle;

/// Polling period of the hotkey watcher
const HOTKEY_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tolerance when matching the pointer against the last synthetic target
const TARGET_TOLERANCE_PX: f64 = 1.0;

#[derive(Debug)]
struct Observation {
    coords: (i32, i32),
    buttons: Vec<bool>,
    keys: Vec<Keycode>,
    last_input: Instant,
    last_target: Option<Point>,
}

/// Input backend over the real devices
pub struct DeviceQueryBackend {
    observation: Mutex<Observation>,
}

impl DeviceQueryBackend {
    /// Backend seeded with the current cursor position
    pub fn new() -> Self {
        let device_state = DeviceState::new();
        let mouse = device_state.get_mouse();
        Self {
            observation: Mutex::new(Observation {
                coords: mouse.coords,
                buttons: mouse.button_pressed,
                keys: device_state.get_keys(),
                last_input: Instant::now(),
                last_target: None,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Observation>> {
        self.observation
            .lock()
            .map_err(|_| TikusError::Internal("device observation poisoned".to_string()))
    }
}

impl Default for DeviceQueryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBackend for DeviceQueryBackend {
    fn cursor_position(&self) -> Result<Point> {
        let (x, y) = DeviceState::new().get_mouse().coords;
        Ok(Point::new(f64::from(x), f64::from(y)))
    }

    fn move_cursor(&self, to: Point) -> Result<()> {
        self.lock()?.last_target = Some(to);
        info!(x = to.x.round(), y = to.y.round(), "cursor move requested (observe mode)");
        Ok(())
    }

    fn idle_time(&self) -> Result<Duration> {
        let device_state = DeviceState::new();
        let mouse = device_state.get_mouse();
        let keys = device_state.get_keys();

        let mut obs = self.lock()?;
        let pointer = Point::new(f64::from(mouse.coords.0), f64::from(mouse.coords.1));
        let synthetic = obs
            .last_target
            .is_some_and(|target| target.distance_to(pointer) <= TARGET_TOLERANCE_PX);
        let pointer_moved = mouse.coords != obs.coords && !synthetic;
        let pressed = mouse.button_pressed != obs.buttons || keys != obs.keys || !keys.is_empty();

        if pointer_moved || pressed {
            obs.last_input = Instant::now();
        }
        obs.coords = mouse.coords;
        obs.buttons = mouse.button_pressed;
        obs.keys = keys;

        Ok(obs.last_input.elapsed())
    }
}

/// Normalized names of the keys currently held
fn pressed_key_names(device_state: &DeviceState) -> Vec<String> {
    device_state.get_keys().iter().map(|key| format!("{key:?}").to_ascii_lowercase()).collect()
}

/// Toggle pause whenever `hotkey` goes down, until `cancel` fires
pub async fn watch_hotkey(hotkey: Hotkey, handle: DriverHandle, cancel: CancellationToken) {
    info!(hotkey = %hotkey, "Pause hotkey active");
    let mut was_down = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Hotkey watcher cancelled");
                break;
            }
            _ = tokio::time::sleep(HOTKEY_POLL_INTERVAL) => {
                let names = pressed_key_names(&DeviceState::new());
                let down = hotkey.matches(names.iter().map(String::as_str));
                if down && !was_down {
                    if let Err(err) = handle.toggle_pause().await {
                        warn!(error = %err, "Failed to toggle pause from hotkey");
                    }
                }
                was_down = down;
            }
        }
    }
}
