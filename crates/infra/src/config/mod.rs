//! Configuration loading
//!
//! This module turns config files and environment variables into a validated
//! [`tikus_domain::Config`].

pub mod loader;

// Re-export commonly used items
pub use loader::{apply_env_overrides, discover_config_path, load, load_from_file};
