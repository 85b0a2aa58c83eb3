//! # Tikus Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - Configuration loading (TOML, JSON, YAML files plus `TIKUS_*` overrides)
//! - Input backends (in-process virtual desktop, `device_query` behind a feature)
//! - Monitor lookup over the configured screen bounds
//! - The async driver that runs the scheduler on a tokio task
//! - Pause hotkey parsing
//!
//! ## Architecture
//! - Implements traits defined in `tikus-core`
//! - Depends on `tikus-domain` and `tikus-core`
//! - Contains all "impure" code (file I/O, devices, timers)

pub mod config;
pub mod hotkey;
pub mod platform;
pub mod runtime;

// Re-export commonly used items
pub use hotkey::{Hotkey, HotkeyError};
pub use platform::*;
pub use runtime::*;
