//! File logging.
//!
//! The editor owns the terminal, so logs only ever go to a file. Without a
//! log file nothing is installed and every `tracing` macro is a no-op.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Errors from setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The path has no file name component.
    #[error("log file path has no file name: {0}")]
    NoFileName(String),
    /// The filter directive could not be parsed.
    #[error("invalid log filter {filter:?}: {message}")]
    Filter { filter: String, message: String },
    /// Another global subscriber is already installed.
    #[error("a tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Parse a filter such as `info` or `nextword_engine=trace,warn`.
///
/// # Errors
///
/// Returns [`LoggingError::Filter`] for an invalid directive.
pub fn filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|e| LoggingError::Filter {
        filter: directives.to_owned(),
        message: e.to_string(),
    })
}

/// Install a file subscriber at `level`. Keep the returned guard alive until
/// exit so buffered lines are flushed.
///
/// # Errors
///
/// Returns a [`LoggingError`] for a bad path or filter, or when a subscriber
/// is already installed.
pub fn init(log_file: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>, LoggingError> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let filter = filter(level)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::NoFileName(path.display().to_string()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;
    Ok(Some(guard))
}
