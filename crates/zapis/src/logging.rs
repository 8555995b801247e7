use std::fs;

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    Layer, filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::Config;

pub const LOG_FILE: &str = "zapis.log";

/// File-only logging: the terminal belongs to the TUI, so nothing is ever
/// written to stdout/stderr while the app runs.
///
/// The returned guard must be kept alive for the duration of the
/// application so buffered log lines are flushed on exit.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.config.data_dir.clone();
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    #[cfg(debug_assertions)]
    let default_directive = "info";
    #[cfg(not(debug_assertions))]
    let default_directive = "warn";

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let file_layer = fmt::Layer::default()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(guard)
}
