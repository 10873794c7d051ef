use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the chat analyser.
#[derive(Error, Debug)]
pub enum AnalyserError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transcript file was read but is not valid UTF-8 text.
    #[error("File {path} is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },

    /// A message marker's date/time portion did not match the export grammar.
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout the analyser crates.
pub type Result<T> = std::result::Result<T, AnalyserError>;

/// Outcome of loading an optional resource.
///
/// `Degraded` still carries a usable value (typically an empty one) plus a
/// warning for the caller to surface; fatal failures use [`Result`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Complete(T),
    Degraded { value: T, warning: String },
}

impl<T> Loaded<T> {
    pub fn value(&self) -> &T {
        match self {
            Loaded::Complete(value) | Loaded::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Loaded::Complete(value) | Loaded::Degraded { value, .. } => value,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            Loaded::Complete(_) => None,
            Loaded::Degraded { warning, .. } => Some(warning),
        }
    }
}
