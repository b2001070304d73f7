use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::LoggingError;

const LOG_FILE_PREFIX: &str = "vpn-catalog.log";

/// Daily-rotated log file appender rooted at `log_dir`, creating the
/// directory if needed.
pub fn file_appender(log_dir: &str) -> Result<RollingFileAppender, LoggingError> {
    fs::create_dir_all(log_dir).map_err(|source| LoggingError::Directory {
        path: log_dir.to_string(),
        source,
    })?;

    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)?)
}

/// Initializes logging with a JSON file layer and a console layer on stderr.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the lifetime of the process.
pub fn init_logging(log_dir: &str) -> Result<WorkerGuard, LoggingError> {
    // Written off the calling thread
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // stdout carries command output
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vpn_catalog=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        file_appender(log_dir.to_str().unwrap()).unwrap();

        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_unusable_log_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();
        let log_dir = blocker.join("logs");

        let err = file_appender(log_dir.to_str().unwrap()).unwrap_err();

        match err {
            LoggingError::Directory { path, .. } => assert_eq!(path, log_dir.to_str().unwrap()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
