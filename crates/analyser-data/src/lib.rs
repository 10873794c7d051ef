//! Data layer for the chat analyser.
//!
//! Responsible for reading exported transcripts, parsing them into message
//! records, enriching those with calendar fields, aggregating statistics over
//! a scoped view and running the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod enrichment;
pub mod parser;
pub mod reader;
pub mod stopwords;
pub mod text;

pub use analyser_core as core;
