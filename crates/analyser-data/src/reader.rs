//! Transcript loading.
//!
//! Reads an exported chat file from disk in one go and hands back its UTF-8
//! contents for the parser.

use std::path::Path;

use analyser_core::error::{AnalyserError, Result};
use tracing::debug;

/// Read the whole transcript at `path` as UTF-8 text.
///
/// A leading byte-order mark, as written by some exporters, is dropped.
pub fn read_transcript(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| AnalyserError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|_| AnalyserError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;

    debug!("read_transcript: {} bytes from {}", text.len(), path.display());

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
