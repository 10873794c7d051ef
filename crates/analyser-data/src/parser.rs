//! Transcript parser.
//!
//! Splits an exported chat transcript into [`MessageRecord`]s.  Every message
//! starts with a marker such as `"01/01/23, 10:00\u{202f}am - "` which both
//! delimits the message and carries its timestamp; the body that follows is
//! either `"<author>: <text>"` or an unattributed system notice.

use std::sync::OnceLock;

use analyser_core::error::Result;
use analyser_core::models::{MessageRecord, GROUP_NOTIFICATION};
use analyser_core::time_utils::{clean_marker, parse_marker_timestamp};
use regex::Regex;
use tracing::debug;

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\n?\d{2}/\d{2}/\d{2,4},\s\d{1,2}:\d{2}[\x{202f}\x{a0} ]?(?:(?i:am|pm)|\d{1,2}:\d{2})\s-\s",
        )
        .expect("regex is valid")
    })
}

fn author_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Non-greedy: the author ends at the first ": ", so colons later in the
    // text ("meet at 9:30: ok") stay in the text.
    RE.get_or_init(|| Regex::new(r"(?s)^(.+?): ").expect("regex is valid"))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse `raw` into message records, preserving transcript order.
///
/// Text before the first marker (an export preamble) is discarded.  A
/// transcript with no markers at all yields an empty vector.  A marker whose
/// date/time cannot be parsed fails the whole call with
/// [`AnalyserError::MalformedTimestamp`](analyser_core::AnalyserError::MalformedTimestamp).
pub fn parse_transcript(raw: &str) -> Result<Vec<MessageRecord>> {
    let markers: Vec<regex::Match<'_>> = marker_regex().find_iter(raw).collect();

    let mut records = Vec::with_capacity(markers.len());
    for (i, marker) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map_or(raw.len(), |next| next.start());
        let body = &raw[marker.end()..body_end];

        let timestamp = parse_marker_timestamp(clean_marker(marker.as_str()))?;
        let (author, text) = split_author(body);

        records.push(MessageRecord {
            author,
            text,
            timestamp,
        });
    }

    debug!(
        "parse_transcript: {} records from {} bytes",
        records.len(),
        raw.len()
    );
    Ok(records)
}

/// Split a message body into `(author, text)`.
///
/// Bodies without an `"<author>: "` prefix are system notices and are
/// attributed to [`GROUP_NOTIFICATION`] with the whole body as text.
pub fn split_author(body: &str) -> (String, String) {
    match author_regex().captures(body) {
        Some(caps) => {
            let prefix_end = caps.get(0).map_or(0, |m| m.end());
            (caps[1].to_string(), body[prefix_end..].to_string())
        }
        None => (GROUP_NOTIFICATION.to_string(), body.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
