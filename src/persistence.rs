//! Loading and saving documents.
//!
//! The core only sees raw bytes on the way in and `\n`-joined text on the way
//! out; [`LineBuffer::from_bytes`] handles decoding.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::text::LineBuffer;

/// Raw contents of `path`.
pub fn load(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded file");
    Ok(bytes)
}

/// Read `path` into a buffer.
pub fn load_buffer(path: &Path) -> Result<LineBuffer> {
    Ok(LineBuffer::from_bytes(&load(path)?))
}

/// Write `text` to `path`, creating parent directories as needed.
pub fn save(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    info!(path = %path.display(), bytes = text.len(), "saved file");
    Ok(())
}
