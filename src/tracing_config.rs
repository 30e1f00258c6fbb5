use std::{env, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{ArchmeError, Result, config::LogLevel};

const LOG_FORMAT_VAR: &str = "ARCHME_LOG_FORMAT";

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

fn json_requested() -> bool {
    env::var(LOG_FORMAT_VAR).is_ok_and(|format| format == "json")
}

/// Initialize tracing for regular command invocations
///
/// Logs go to stderr so they never mix with command output on stdout.
/// Uses RUST_LOG if set, otherwise the configured level.
/// Emits JSON when `ARCHME_LOG_FORMAT=json`.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init_cli_mode(level: LogLevel) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    let result = if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_level(true)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| ArchmeError::Logging(e.to_string()))
}

/// Initialize tracing with file output only
///
/// Used when the terminal belongs to the TUI. Writes daily-rotated files
/// named `archme.<date>.log` into `log_dir`, keeping `retention_days` files.
/// The returned guard flushes pending lines on drop and must be held until exit.
///
/// # Errors
/// Returns error if the log directory or appender cannot be created, or a
/// global subscriber is already installed
pub fn init_with_file(
    level: LogLevel,
    log_dir: &Path,
    retention_days: usize,
) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir).map_err(|e| ArchmeError::io_at(&e, log_dir))?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(retention_days)
        .filename_prefix("archme")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| ArchmeError::Logging(e.to_string()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter(level));

    let result = if json_requested() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .try_init()
    };

    result.map_err(|e| ArchmeError::Logging(e.to_string()))?;

    tracing::info!(
        directory = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "Logging session started"
    );

    Ok(guard)
}
