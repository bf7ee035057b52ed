use std::io;
use configs::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize tracing subscriber with compact output on stdout.
/// - Respects `RUST_LOG` if set, defaults to `info`
pub fn init_logging_default() {
    init_compact_with(DEFAULT_FILTER);
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to `info,service::posts=debug`
/// - Writes to stdout for consistent container logging behavior
pub fn init_logging_json() {
    init_json_with(&format!("{DEFAULT_FILTER},service::posts=debug"));
}

fn init_json_with(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

fn init_compact_with(fallback: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize logging as described by the `[logging]` config section.
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logging(cfg: &LoggingConfig) {
    let fallback = cfg.filter.as_deref().unwrap_or(DEFAULT_FILTER);
    match cfg.format {
        LogFormat::Compact => init_compact_with(fallback),
        LogFormat::Json => init_json_with(fallback),
    }
}
