//! Tracing subscriber for the `solarpaper` binary.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::solarpaper_errors::SolarpaperError;

/// Install a compact stderr logger.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `info`, or `debug` when
/// `verbose` is set.
pub fn init_logging(verbose: bool) -> Result<(), SolarpaperError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = default_filter(level)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| SolarpaperError::InvalidConfig(format!("logger already installed: {e}")))
}

fn default_filter(level: Level) -> Result<EnvFilter, SolarpaperError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("solarpaper={level}")))
        .map_err(|e| SolarpaperError::InvalidConfig(format!("invalid log filter: {e}")))
}
