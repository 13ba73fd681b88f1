use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::core::{LoggingConfig, Result, SorterError};

/// Initializes logging with console output and an append-only log file.
///
/// `RUST_LOG` overrides the configured level. Keep the returned guard alive
/// for the whole run, or buffered file output is lost on exit.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let (dir, file_name) = split_log_path(&config.file)?;
    fs::create_dir_all(dir)?;

    // Never rotates: one flat file, appended across runs
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(non_blocking_writer);

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| SorterError::Config(format!("invalid log level '{}': {}", config.level, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| SorterError::Config(format!("logging already initialized: {}", e)))?;

    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SorterError::Config(format!("log file '{}' has no file name", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}
