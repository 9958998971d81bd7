//! Tracing setup.
//!
//! Writing logs to the terminal while the TUI holds the alternate screen would
//! corrupt the display, so interactive runs log to a file by default.

use std::fs::OpenOptions;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use crate::error::AppError;

/// Install the global subscriber.
///
/// The returned guard flushes buffered log lines on drop; keep it alive for
/// the whole run.
pub fn init(settings: &Settings, owns_terminal: bool) -> Result<WorkerGuard, AppError> {
    let to_file = settings.log_mode.use_file(owns_terminal);
    let (writer, guard) = if to_file {
        if let Some(parent) = settings.log_file.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)
            .map_err(|e| {
                AppError::input(format!(
                    "Failed to open log file '{}': {e}",
                    settings.log_file.display()
                ))
            })?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    // stderr shares the terminal with command output; keep it quiet unless asked.
    let default_level = if to_file { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_target(false))
        .try_init();

    Ok(guard)
}
