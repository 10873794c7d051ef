//! Shared vocabulary for the chat analyser.
//!
//! Defines the error type, parsed-record and output-row models, the
//! transcript timestamp grammar with its calendar helpers, number formatting
//! and command-line settings used by the data and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{AnalyserError, Loaded, Result};
