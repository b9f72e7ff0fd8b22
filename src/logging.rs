//! Log file bootstrap.
//!
//! The terminal belongs to the editor, so log output goes to a file (by
//! default `~/.gim/logs.txt`). The filter comes from `GIM_LOG` using the usual
//! `tracing_subscriber::EnvFilter` syntax and defaults to `info`.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// File name used when `path` has none.
const DEFAULT_FILE: &str = "logs.txt";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GIM_LOG";

/// Filter used when `GIM_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global subscriber appending to `path`.
///
/// Returns `Ok(false)` when another subscriber was already installed; the log
/// file is still created in that case.
pub fn init(path: &Path) -> Result<bool> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_with_filter(path, filter)
}

/// Like [`init`] with an explicit filter.
pub fn init_with_filter(path: &Path, filter: EnvFilter) -> Result<bool> {
    let appender = file_appender(path)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(path = %path.display(), "logging started");
    }
    Ok(installed)
}

/// Non-rotating appender writing to `path`, creating parent directories.
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_FILE);
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)?;
    Ok(appender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn log_file_is_created_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gim/logs.txt");
        let mut appender = file_appender(&path).unwrap();
        writeln!(appender, "first").unwrap();
        drop(appender);

        let mut appender = file_appender(&path).unwrap();
        writeln!(appender, "second").unwrap();
        appender.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn unusable_log_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let err = file_appender(&blocker.join("logs.txt")).unwrap_err();
        assert!(matches!(err, crate::Error::Log(_)));
    }

    #[test]
    fn init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        // Another test may already own the global subscriber.
        let _ = init_with_filter(&path, EnvFilter::new("debug")).unwrap();
        assert!(path.exists());
    }
}
