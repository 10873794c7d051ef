//! Aggregation engine: counts, rankings and time-bucketed tables over a
//! scoped view of enriched messages.
//!
//! A [`ScopedView`] is built once per analysis from the enriched records and a
//! [`Scope`]; every operation borrows it immutably, so all results describe
//! the same snapshot.  Operations that only make sense for the whole chat live
//! on [`GroupView`], which can only be obtained from an unscoped view.

use std::collections::{BTreeMap, BTreeSet};

use analyser_core::formatting::percentage;
use analyser_core::models::{
    ActivityHeatmap, DailyPoint, EmojiFrequency, EnrichedMessage, MonthActivity, Scope,
    SummaryStats, TimelinePoint, UserActivity, UserShare, WeekdayActivity, WordFrequency,
    GROUP_NOTIFICATION, MEDIA_PLACEHOLDER, OVERALL,
};
use analyser_core::time_utils::{hour_bucket, month_name, MONTHS, WEEKDAYS};
use chrono::{Datelike, NaiveDate};

use crate::stopwords::StopwordSet;
use crate::text;

/// Length of the word and emoji rankings.
pub const TOP_RANKED: usize = 20;

/// Number of participants in the most-active ranking.
pub const TOP_USERS: usize = 5;

// ── user_list ─────────────────────────────────────────────────────────────────

/// Selectable scopes: [`OVERALL`] first, then each participant once in
/// transcript order.  The [`GROUP_NOTIFICATION`] sentinel is never listed.
pub fn user_list(messages: &[EnrichedMessage]) -> Vec<String> {
    let mut users = vec![OVERALL.to_string()];
    let mut seen = BTreeSet::new();
    for msg in messages {
        let author = msg.author();
        if author != GROUP_NOTIFICATION && seen.insert(author) {
            users.push(author.to_string());
        }
    }
    users
}

// ── ScopedView ────────────────────────────────────────────────────────────────

/// Read-only view of the messages selected by a [`Scope`].
#[derive(Debug, Clone)]
pub struct ScopedView<'a> {
    scope: Scope,
    messages: Vec<&'a EnrichedMessage>,
}

impl<'a> ScopedView<'a> {
    /// Filter `messages` by `scope`.  The input slice is only borrowed.
    pub fn new(messages: &'a [EnrichedMessage], scope: Scope) -> Self {
        let messages = messages
            .iter()
            .filter(|m| scope.matches(&m.record))
            .collect();
        Self { scope, messages }
    }

    /// Unscoped view over every message.
    pub fn overall(messages: &'a [EnrichedMessage]) -> Self {
        Self::new(messages, Scope::Overall)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn messages(&self) -> &[&'a EnrichedMessage] {
        &self.messages
    }

    /// Group-only operations, available when this view is unscoped.
    pub fn group(&self) -> Option<GroupView<'_>> {
        self.scope.is_overall().then(|| GroupView {
            messages: &self.messages,
        })
    }

    fn iter(&self) -> impl Iterator<Item = &'a EnrichedMessage> + '_ {
        self.messages.iter().copied()
    }

    // ── Scalar counts ─────────────────────────────────────────────────────────

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Total whitespace-delimited tokens across all texts.
    pub fn word_count(&self) -> usize {
        self.iter().map(|m| text::word_count(m.text())).sum()
    }

    /// Messages whose body is the media placeholder.
    pub fn media_count(&self) -> usize {
        self.iter().filter(|m| m.record.is_media()).count()
    }

    /// URLs found across all texts.
    pub fn link_count(&self) -> usize {
        self.iter().map(|m| text::link_count(m.text())).sum()
    }

    pub fn summary(&self) -> SummaryStats {
        SummaryStats {
            messages: self.message_count(),
            words: self.word_count(),
            media: self.media_count(),
            links: self.link_count(),
        }
    }

    // ── Text ──────────────────────────────────────────────────────────────────

    /// All texts joined with a space, media placeholders removed.
    pub fn word_cloud_text(&self) -> String {
        self.iter()
            .map(|m| m.text())
            .collect::<Vec<_>>()
            .join(" ")
            .replace(MEDIA_PLACEHOLDER, "")
    }

    /// The [`TOP_RANKED`] most frequent lowercase words.
    ///
    /// System notices and media placeholders are skipped, as is every word in
    /// `stopwords`.  An empty stopword set ranks every word.
    pub fn most_common_words(&self, stopwords: &StopwordSet) -> Vec<WordFrequency> {
        let words = self
            .iter()
            .filter(|m| !m.record.is_group_notification() && !m.record.is_media())
            .flat_map(|m| m.text().split_whitespace())
            .map(str::to_lowercase)
            .filter(|w| !stopwords.contains(w));

        text::rank_by_frequency(words, TOP_RANKED)
            .into_iter()
            .map(|(word, frequency)| WordFrequency { word, frequency })
            .collect()
    }

    /// The [`TOP_RANKED`] most frequent emoji characters.
    pub fn most_used_emojis(&self) -> Vec<EmojiFrequency> {
        let emojis = self.iter().flat_map(|m| text::emojis(m.text()));

        text::rank_by_frequency(emojis, TOP_RANKED)
            .into_iter()
            .map(|(emoji, frequency)| EmojiFrequency { emoji, frequency })
            .collect()
    }

    // ── Time series ───────────────────────────────────────────────────────────

    /// Messages per calendar month, chronological, labelled `"<Month>-<Year>"`.
    pub fn timeline(&self) -> Vec<TimelinePoint> {
        let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for msg in self.iter() {
            *months
                .entry((msg.calendar.year, msg.calendar.month))
                .or_default() += 1;
        }

        months
            .into_iter()
            .map(|((year, month), messages)| TimelinePoint {
                label: format!("{}-{}", month_name(month), year),
                messages,
            })
            .collect()
    }

    /// Messages per calendar day, ascending.
    pub fn daily_timeline(&self) -> Vec<DailyPoint> {
        let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for msg in self.iter() {
            *days.entry(msg.calendar.date_only).or_default() += 1;
        }

        days.into_iter()
            .map(|(date, messages)| DailyPoint { date, messages })
            .collect()
    }

    /// Exactly seven rows, Monday to Sunday, zero-filled.
    pub fn most_active_day_of_week(&self) -> Vec<WeekdayActivity> {
        let mut counts = [0usize; 7];
        for msg in self.iter() {
            counts[weekday_index(msg)] += 1;
        }

        WEEKDAYS
            .iter()
            .zip(counts)
            .map(|(day, messages)| WeekdayActivity {
                weekday: day.to_string(),
                messages,
            })
            .collect()
    }

    /// Exactly twelve rows, January to December, zero-filled.
    pub fn most_active_month(&self) -> Vec<MonthActivity> {
        let mut counts = [0usize; 12];
        for msg in self.iter() {
            counts[(msg.calendar.month - 1) as usize] += 1;
        }

        MONTHS
            .iter()
            .zip(counts)
            .map(|(month, messages)| MonthActivity {
                month: month.to_string(),
                messages,
            })
            .collect()
    }

    /// Weekday × hour-bucket message counts.
    ///
    /// Rows are the weekdays that occur (Monday first), columns the hour
    /// buckets that occur (by hour); absent combinations are 0.
    pub fn activity_heatmap(&self) -> ActivityHeatmap {
        let mut cells: BTreeMap<(usize, u32), usize> = BTreeMap::new();
        let mut days = BTreeSet::new();
        let mut hours = BTreeSet::new();
        for msg in self.iter() {
            let day = weekday_index(msg);
            days.insert(day);
            hours.insert(msg.calendar.hour);
            *cells.entry((day, msg.calendar.hour)).or_default() += 1;
        }

        let counts: Vec<Vec<usize>> = days
            .iter()
            .map(|&day| {
                hours
                    .iter()
                    .map(|&hour| cells.get(&(day, hour)).copied().unwrap_or(0))
                    .collect::<Vec<usize>>()
            })
            .collect();

        ActivityHeatmap {
            weekdays: days.iter().map(|&d| WEEKDAYS[d].to_string()).collect(),
            hour_buckets: hours.iter().map(|&h| hour_bucket(h)).collect(),
            counts,
        }
    }
}

fn weekday_index(msg: &EnrichedMessage) -> usize {
    msg.calendar.date_only.weekday().num_days_from_monday() as usize
}

// ── GroupView ─────────────────────────────────────────────────────────────────

/// Participant rankings over the whole chat.  Obtained via
/// [`ScopedView::group`].
#[derive(Debug, Clone, Copy)]
pub struct GroupView<'v> {
    messages: &'v [&'v EnrichedMessage],
}

impl<'v> GroupView<'v> {
    /// Every participant with their message count, descending; ties keep
    /// first-encounter order.
    fn ranked_users(&self) -> Vec<(String, usize)> {
        let authors = self
            .messages
            .iter()
            .map(|m| m.author())
            .filter(|a| *a != GROUP_NOTIFICATION);
        text::rank_by_frequency(authors, usize::MAX)
    }

    /// The [`TOP_USERS`] participants with the most messages.
    pub fn most_active_users(&self) -> Vec<UserActivity> {
        self.ranked_users()
            .into_iter()
            .take(TOP_USERS)
            .map(|(user, messages)| UserActivity { user, messages })
            .collect()
    }

    /// Each participant's share of all messages in percent, rounded to two
    /// decimal places.
    pub fn most_active_users_percentage(&self) -> Vec<UserShare> {
        let total = self.messages.len();
        self.ranked_users()
            .into_iter()
            .map(|(user, count)| UserShare {
                user,
                percentage: percentage(count, total, 2),
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
