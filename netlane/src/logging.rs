//! Process-wide logging setup for binaries embedding the pipeline.
//!
//! Installs a `tracing` subscriber with two layers:
//! - a compact stderr layer for interactive use
//! - an optional plain-text file layer (truncated at session start)
//!
//! Filtering honours `RUST_LOG`; without it the default directive is
//! `info`, or `debug` when the caller asks for verbose output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the file writer, if one was installed.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Options for [`init_logging`].
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Log file path. `None` logs to stderr only.
    pub file: Option<PathBuf>,
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset.
    pub verbose: bool,
}

/// Initialize the global `tracing` subscriber.
///
/// # Errors
///
/// Returns an error if the log file's directory cannot be created or the
/// file cannot be truncated. Installing a second global subscriber in the
/// same process is reported as [`io::ErrorKind::AlreadyExists`].
pub fn init_logging(options: &LoggingOptions) -> Result<LoggingGuard, io::Error> {
    let default_directive = if options.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, file_guard) = match &options.file {
        Some(path) => {
            let (dir, name) = prepare_log_file(path)?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create the parent directory and clear any previous session's content.
fn prepare_log_file(path: &Path) -> Result<(PathBuf, PathBuf), io::Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

    fs::create_dir_all(&dir)?;
    fs::write(dir.join(&name), "")?;
    Ok((dir, name))
}

/// Default log file name inside the configuration directory.
pub fn default_log_file() -> &'static str {
    "netlane.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_log_file() {
        assert_eq!(default_log_file(), "netlane.log");
    }

    #[test]
    fn test_prepare_creates_directory_and_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("run.log");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "previous session").unwrap();

        let (dir, name) = prepare_log_file(&path).unwrap();

        assert_eq!(dir, temp.path().join("nested"));
        assert_eq!(name, PathBuf::from("run.log"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_prepare_bare_file_name_uses_current_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fresh.log");
        let (dir, _) = prepare_log_file(&path).unwrap();
        assert!(dir.exists());
        assert!(path.exists());
    }

    #[test]
    fn test_prepare_rejects_path_without_file_name() {
        let result = prepare_log_file(Path::new("/"));
        assert!(result.is_err());
    }
}
