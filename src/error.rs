//! Error types for gim.
//!
//! Only failures that a user can act on are errors here. Out-of-range
//! positions are clamped by the buffer and "nothing to undo" style results are
//! plain `Option`s, so neither shows up in this enum.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for gim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gim operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading or writing a document or config file.
    Io(io::Error),
    /// A configuration file exists but could not be decoded.
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
    /// The log file appender could not be created.
    Log(tracing_appender::rolling::InitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::Log(e) => write!(f, "log file error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config { source, .. } => Some(source),
            Self::Log(e) => Some(e),
            Self::InvalidColor(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<tracing_appender::rolling::InitError> for Error {
    fn from(e: tracing_appender::rolling::InitError) -> Self {
        Self::Log(e)
    }
}

impl Error {
    /// True when the underlying cause is a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}
