//! Tracing subscriber initialization.
//!
//! The terminal belongs to the UI while citysearch runs, so logs go to a
//! file. Follow them with `tail -f` in another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log file path into the directory and file name the appender wants.
///
/// A bare file name (`citysearch.log`) resolves to the current directory.
fn split_log_path(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => return Err(LoggingError::NoParentDirectory(log_path.to_path_buf())),
    };

    Ok((directory, file_name.to_string()))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaulting to [`DEFAULT_FILTER`]. Creates the log
/// directory if it doesn't exist.
///
/// # Errors
///
/// Returns `LoggingError` if the path is unusable, the directory cannot be
/// created, or a global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn split_log_path_separates_directory_and_file() {
        let (dir, file) = split_log_path(Path::new("/var/log/citysearch/app.log")).unwrap();

        assert_eq!(dir, PathBuf::from("/var/log/citysearch"));
        assert_eq!(file, "app.log");
    }

    #[test]
    fn split_log_path_bare_file_uses_current_directory() {
        let (dir, file) = split_log_path(Path::new("citysearch.log")).unwrap();

        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(file, "citysearch.log");
    }

    #[test]
    fn split_log_path_rejects_root() {
        let result = split_log_path(Path::new("/"));

        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("citysearch_test_logs_create");
        let log_file = test_dir.join("test.log");
        let _ = fs::remove_dir_all(&test_dir);

        // Subscriber may already be set by another test; the directory is
        // created regardless.
        let _ = init(&log_file);

        assert!(
            test_dir.exists(),
            "Log directory should be created: {:?}",
            test_dir
        );

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn init_reports_directory_creation_failure() {
        let blocker = std::env::temp_dir().join("citysearch_test_logs_blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let log_file = blocker.join("nested").join("app.log");

        let result = init(&log_file);

        assert!(
            matches!(result, Err(LoggingError::DirectoryCreation { .. })),
            "expected DirectoryCreation, got {:?}",
            result
        );

        let _ = fs::remove_file(&blocker);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let test_dir = std::env::temp_dir().join("citysearch_test_logs_twice");
        let log_file = test_dir.join("twice.log");

        let _ = init(&log_file);
        let second = init(&log_file);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

        let _ = fs::remove_dir_all(&test_dir);
    }
}
