use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the persistent profile store.
///
/// The session treats all of these as recoverable: reads fall back to
/// defaults and writes are best-effort.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no local data directory is available on this platform")]
    NoDataDir,

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed data in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store is unavailable")]
    Unavailable,
}

/// Failures while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global log subscriber is already installed")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}
