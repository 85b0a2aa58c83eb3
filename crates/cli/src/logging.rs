//! Subscriber setup for the binary

use anyhow::anyhow;
use tikus_domain::Verbosity;
use tracing_subscriber::EnvFilter;

use crate::args::LogFormat;

/// Default filter directive for a verbosity level
fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `verbosity`.
pub fn init(verbosity: Verbosity, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
