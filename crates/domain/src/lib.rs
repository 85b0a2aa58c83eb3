//! # Tikus Domain
//!
//! Domain types and models for the cursor keep-alive scheduler.
//!
//! This crate contains:
//! - Geometry and activity types (points, monitor bounds, idle samples)
//! - Movement commands, scheduler events and statistics snapshots
//! - The validated configuration model
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - Depends only on the foundation tier of `tikus-common`
//! - Pure data structures; no clocks, threads or I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
