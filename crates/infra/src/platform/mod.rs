//! Input backends and monitor lookup
//!
//! # Backends
//!
//! - **[`VirtualDesktop`]**: in-process cursor used for dry runs and tests
//! - **`DeviceQueryBackend`** (feature `device-query`): reads the real pointer
//!   and keyboard through `device_query`

pub mod monitors;
pub mod virtual_desktop;

#[cfg(feature = "device-query")]
pub mod device;

#[cfg(feature = "device-query")]
pub use device::{watch_hotkey, DeviceQueryBackend};
pub use monitors::ConfiguredMonitors;
pub use virtual_desktop::VirtualDesktop;
