//! # Tikus Core
//!
//! The activity-adaptive movement scheduler - no infrastructure dependencies.
//!
//! This crate contains:
//! - The idle/movement state machine ([`MovementScheduler`])
//! - Six pattern generators behind [`PatternGenerator`]
//! - The adaptive interval policy, schedule gate and boundary clamp
//! - Port traits for the input backend and monitor lookup
//!
//! ## Architecture Principles
//! - Only depends on `tikus-common` and `tikus-domain`
//! - No threads, timers or platform code; the caller drives [`MovementScheduler::tick`]
//! - Clock, randomness, input backend and monitor lookup are injected

pub mod clamp;
pub mod gate;
pub mod interval;
pub mod patterns;
pub mod ports;
pub mod scheduler;

pub use clamp::clamp;
pub use gate::is_permitted;
pub use interval::compute_interval;
pub use patterns::{build_pattern, PatternGenerator};
pub use ports::{InputBackend, MonitorLookup};
pub use scheduler::MovementScheduler;
