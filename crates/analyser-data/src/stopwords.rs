//! Stopword list used to filter the word-frequency ranking.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use analyser_core::error::{AnalyserError, Loaded, Result};
use tracing::{debug, warn};

/// A set of lowercase tokens excluded from word rankings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build a set from whitespace/newline separated tokens.  Tokens are
    /// lowercased so lookups match the lowercased message words.
    pub fn parse(content: &str) -> Self {
        Self {
            words: content
                .split_whitespace()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Load the stopword list at `path`.
///
/// A missing file is not fatal: the result is [`Loaded::Degraded`] with an
/// empty set, so word rankings fall back to unfiltered counts.  Other read
/// failures are returned as errors.
pub fn load_stopwords(path: &Path) -> Result<Loaded<StopwordSet>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let set = StopwordSet::parse(&content);
            debug!("Loaded {} stopwords from {}", set.len(), path.display());
            Ok(Loaded::Complete(set))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let warning = format!(
                "Stopword list {} not found; word ranking is unfiltered",
                path.display()
            );
            warn!("{}", warning);
            Ok(Loaded::Degraded {
                value: StopwordSet::default(),
                warning,
            })
        }
        Err(source) => Err(AnalyserError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
