use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable overriding the log file location.
pub const LOG_ENV: &str = "RETROTERM_LOG";

pub fn log_file_path() -> PathBuf {
    std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("retroterm.log"))
}

/// Install the global subscriber, writing to a file so the TUI stays clean.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Returns false if the
/// log file could not be created; the app keeps running without logs.
pub fn init() -> bool {
    let Ok(file) = File::create(log_file_path()) else {
        return false;
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .is_ok()
}
