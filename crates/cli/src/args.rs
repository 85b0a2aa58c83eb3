//! Command-line arguments
//!
//! Flags override whatever the configuration file and `TIKUS_*` environment
//! variables produced; they are applied last, before validation.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tikus_common::time::parse_duration;
use tikus_domain::{Config, PatternKind, Verbosity};

/// Keep the session alive by nudging the cursor while you are away
#[derive(Parser, Debug)]
#[command(name = "tikus", version, about)]
pub struct Cli {
    /// Path to a TOML, JSON or YAML config file
    #[arg(long, short, env = "TIKUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Idle time before movement starts, in seconds or like `5m`
    #[arg(long, short = 'i', value_parser = parse_idle_time)]
    pub idle_time: Option<Duration>,

    /// Movement pattern
    #[arg(long, short, value_parser = parse_pattern)]
    pub pattern: Option<PatternKind>,

    /// Maximum step of the random pattern, in pixels
    #[arg(long, short)]
    pub range: Option<f64>,

    /// Only log warnings and errors
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every move
    #[arg(long, short)]
    pub verbose: bool,

    /// Only move during the configured work hours
    #[arg(long)]
    pub work_hours_only: bool,

    /// Drive an in-memory cursor instead of the real one
    #[arg(long)]
    pub dry_run: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Layer the flags over a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(idle) = self.idle_time {
            config.scheduler.idle_timeout = idle;
        }
        if let Some(pattern) = self.pattern {
            config.scheduler.pattern = pattern;
        }
        if let Some(range) = self.range {
            config.scheduler.movement_range = range;
        }
        if self.work_hours_only {
            config.scheduler.work_hours.only = true;
        }
        if self.quiet {
            config.runtime.verbosity = Verbosity::Quiet;
        } else if self.verbose {
            config.runtime.verbosity = Verbosity::Verbose;
        }
    }
}

fn parse_idle_time(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

fn parse_pattern(s: &str) -> Result<PatternKind, String> {
    s.parse()
}
