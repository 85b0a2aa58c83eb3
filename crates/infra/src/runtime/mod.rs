//! Runtime driver for the movement scheduler
//!
//! The scheduler itself is synchronous; this module owns it on a tokio task,
//! feeds it idle samples, applies its commands and exposes a control handle.

pub mod driver;
pub mod error;

pub use driver::{ControlSignal, DriverHandle, DriverSettings, MovementDriver};
pub use error::{DriverError, DriverResult};
