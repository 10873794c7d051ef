//! Main analysis pipeline for the chat analyser.
//!
//! Parses a transcript, enriches the records with calendar fields, builds one
//! scoped view and runs every aggregation over it, returning an
//! [`AnalysisReport`] ready for the display layer.

use analyser_core::error::{Loaded, Result};
use analyser_core::models::{
    ActivityHeatmap, DailyPoint, EmojiFrequency, MonthActivity, Scope, SummaryStats,
    TimelinePoint, UserActivity, UserShare, WeekdayActivity, WordFrequency,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregator::{user_list, ScopedView};
use crate::enrichment::enrich;
use crate::parser::parse_transcript;
use crate::stopwords::StopwordSet;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Scope the aggregations were computed for.
    pub scope: Scope,
    /// Number of records parsed from the transcript.
    pub records_parsed: usize,
    /// Number of records inside the scope.
    pub records_in_scope: usize,
    /// Number of distinct participants (excluding system notices).
    pub participants: usize,
    /// Wall-clock seconds spent parsing and enriching.
    pub parse_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
    /// Non-fatal problems, e.g. a missing stopword list.
    pub warnings: Vec<String>,
}

/// The complete output of [`analyze_transcript`].
///
/// `most_active_users` and `user_shares` are empty for a user-scoped report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: AnalysisMetadata,
    /// Selectable scopes, `"Overall"` first.
    pub users: Vec<String>,
    pub summary: SummaryStats,
    pub timeline: Vec<TimelinePoint>,
    pub daily_timeline: Vec<DailyPoint>,
    pub busiest_days: Vec<WeekdayActivity>,
    pub busiest_months: Vec<MonthActivity>,
    pub heatmap: ActivityHeatmap,
    pub most_active_users: Vec<UserActivity>,
    pub user_shares: Vec<UserShare>,
    pub most_common_words: Vec<WordFrequency>,
    pub most_used_emojis: Vec<EmojiFrequency>,
    pub word_cloud_text: String,
}

impl AnalysisReport {
    /// Serialise the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Parse `raw` into records (fatal on a malformed marker timestamp).
/// 2. Enrich each record with calendar fields.
/// 3. Build a single [`ScopedView`] for `scope`.
/// 4. Run every aggregation; group rankings only for the overall scope.
///
/// A degraded stopword list is used as-is and its warning is recorded in the
/// report metadata.
pub fn analyze_transcript(
    raw: &str,
    scope: Scope,
    stopwords: Loaded<StopwordSet>,
) -> Result<AnalysisReport> {
    let mut warnings = Vec::new();
    if let Some(warning) = stopwords.warning() {
        warnings.push(warning.to_string());
    }
    let stopwords = stopwords.into_value();

    // ── Step 1-2: Parse and enrich ────────────────────────────────────────────
    let parse_start = std::time::Instant::now();
    let records = parse_transcript(raw)?;
    let messages = enrich(&records);
    let parse_time = parse_start.elapsed().as_secs_f64();

    if messages.is_empty() {
        warn!("Transcript contains no recognisable messages");
        warnings.push("Transcript contains no recognisable messages".to_string());
    }

    // ── Step 3: Scoped view ───────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let users = user_list(&messages);
    let participants = users.len() - 1;
    let view = ScopedView::new(&messages, scope.clone());

    if let Scope::User(name) = &scope {
        if view.message_count() == 0 {
            warnings.push(format!("No messages from \"{}\"", name));
        }
    }

    // ── Step 4: Aggregations ──────────────────────────────────────────────────
    let (most_active_users, user_shares) = match view.group() {
        Some(group) => (
            group.most_active_users(),
            group.most_active_users_percentage(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let mut report = AnalysisReport {
        users,
        summary: view.summary(),
        timeline: view.timeline(),
        daily_timeline: view.daily_timeline(),
        busiest_days: view.most_active_day_of_week(),
        busiest_months: view.most_active_month(),
        heatmap: view.activity_heatmap(),
        most_active_users,
        user_shares,
        most_common_words: view.most_common_words(&stopwords),
        most_used_emojis: view.most_used_emojis(),
        word_cloud_text: view.word_cloud_text(),
        metadata: AnalysisMetadata {
            generated_at: Utc::now().to_rfc3339(),
            scope,
            records_parsed: records.len(),
            records_in_scope: view.message_count(),
            participants,
            parse_time_seconds: parse_time,
            aggregate_time_seconds: 0.0,
            warnings,
        },
    };

    report.metadata.aggregate_time_seconds = aggregate_start.elapsed().as_secs_f64();

    debug!(
        "analyze_transcript: {} records, {} in scope {}",
        report.metadata.records_parsed, report.metadata.records_in_scope, report.metadata.scope
    );
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
