//! Logging infrastructure for GeoFleet.
//!
//! Structured logging with dual output:
//! - a non-blocking file writer under the given log directory
//! - stdout, for tailing an interactive run
//!
//! Verbosity comes from `RUST_LOG`, defaulting to `info`. The embedding
//! application calls [`init_logging`] once at startup and holds the returned
//! guard for the process lifetime so buffered log lines flush on exit.

use std::fs;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "geofleet.log";

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initializes the global tracing subscriber.
///
/// Creates the log directory if needed and appends to `log_file` inside it.
/// File output carries no ANSI colors; stdout does.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
///
/// # Panics
///
/// Panics if a global subscriber is already installed; call this once.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .compact();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        assert_eq!(DEFAULT_LOG_DIR, "logs");
        assert_eq!(DEFAULT_LOG_FILE, "geofleet.log");
    }

    #[test]
    fn test_init_logging_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let log_dir = log_dir.to_str().unwrap();

        let guard = init_logging(log_dir, "test.log").unwrap();
        tracing::info!("logging initialized");
        drop(guard);

        assert!(std::path::Path::new(log_dir).join("test.log").exists());
    }
}
