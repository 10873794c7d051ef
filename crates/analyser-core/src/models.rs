use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author assigned to system lines (joins, leaves, subject changes) that carry
/// no `"<author>: "` prefix.
pub const GROUP_NOTIFICATION: &str = "Group Notification";

/// Body the exporter writes in place of an attached photo, video or document.
pub const MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Synthetic entry placed first in the user list; selecting it means "no filter".
pub const OVERALL: &str = "Overall";

/// Column names of the tabular outputs.  The display layer binds to these
/// verbatim, so they double as the serde field names of the row types below.
pub mod columns {
    pub const USER_NAME: &str = "User Name";
    pub const NUMBER_OF_CHATS: &str = "Number of Chats";
    pub const PERCENTAGE: &str = "Percentage";
    pub const TIME: &str = "Time";
    pub const TIME_DATE: &str = "Time (Date)";
    pub const NUMBER_OF_MESSAGES: &str = "Number of Messages";
    pub const WORDS: &str = "Words";
    pub const FREQUENCY: &str = "Frequency";
    pub const EMOJIS: &str = "Emojis";
    pub const DAY_OF_THE_WEEK: &str = "Day of the Week";
    pub const MONTH: &str = "Month";
}

// ── Parsed records ────────────────────────────────────────────────────────────

/// One message detected in a transcript, in transcript order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Participant name, or [`GROUP_NOTIFICATION`] for system lines.
    pub author: String,
    /// Message body.  May be empty or the [`MEDIA_PLACEHOLDER`].
    pub text: String,
    /// Local wall-clock time of the message, minute precision.
    pub timestamp: NaiveDateTime,
}

impl MessageRecord {
    /// `true` for system lines attributed to the [`GROUP_NOTIFICATION`] sentinel.
    pub fn is_group_notification(&self) -> bool {
        self.author == GROUP_NOTIFICATION
    }

    /// `true` when the body is exactly the media placeholder, ignoring a
    /// trailing line break.
    pub fn is_media(&self) -> bool {
        self.text.trim_end_matches(['\n', '\r']) == MEDIA_PLACEHOLDER
    }
}

/// Calendar fields derived from a record's timestamp by time enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFields {
    pub year: i32,
    /// Month number, 1–12.
    pub month: u32,
    /// Full English month name, e.g. `"January"`.
    pub month_name: String,
    pub day_of_month: u32,
    /// Full English weekday name, e.g. `"Sunday"`.
    pub weekday_name: String,
    /// Hour of day, 0–23.
    pub hour: u32,
    pub minute: u32,
    pub date_only: NaiveDate,
    /// One-hour window label such as `"9-10"`, `"23-00"` or `"00-1"`.
    pub hour_bucket: String,
}

/// A [`MessageRecord`] together with its derived [`CalendarFields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedMessage {
    #[serde(flatten)]
    pub record: MessageRecord,
    #[serde(flatten)]
    pub calendar: CalendarFields,
}

impl EnrichedMessage {
    pub fn author(&self) -> &str {
        &self.record.author
    }

    pub fn text(&self) -> &str {
        &self.record.text
    }
}

// ── Scope ─────────────────────────────────────────────────────────────────────

/// Which records an analysis covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Every record in the transcript.
    Overall,
    /// Only records written by the named author.
    User(String),
}

impl Scope {
    /// Map a user-list selection to a scope.  The synthetic [`OVERALL`] entry
    /// selects the unfiltered view.
    pub fn from_selection(selection: &str) -> Self {
        if selection == OVERALL {
            Scope::Overall
        } else {
            Scope::User(selection.to_string())
        }
    }

    /// Whether `record` falls inside this scope.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        match self {
            Scope::Overall => true,
            Scope::User(name) => record.author == *name,
        }
    }

    pub fn is_overall(&self) -> bool {
        matches!(self, Scope::Overall)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Overall => f.write_str(OVERALL),
            Scope::User(name) => f.write_str(name),
        }
    }
}

// ── Aggregation outputs ───────────────────────────────────────────────────────

/// The four headline counts of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub messages: usize,
    pub words: usize,
    pub media: usize,
    pub links: usize,
}

/// Message count of one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    #[serde(rename = "User Name")]
    pub user: String,
    #[serde(rename = "Number of Chats")]
    pub messages: usize,
}

/// A participant's share of all messages, in percent rounded to 2 places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserShare {
    #[serde(rename = "User Name")]
    pub user: String,
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    #[serde(rename = "Words")]
    pub word: String,
    #[serde(rename = "Frequency")]
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiFrequency {
    #[serde(rename = "Emojis")]
    pub emoji: String,
    #[serde(rename = "Frequency")]
    pub frequency: usize,
}

/// Messages in one calendar month, labelled `"<Month>-<Year>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    #[serde(rename = "Time")]
    pub label: String,
    #[serde(rename = "Number of Messages")]
    pub messages: usize,
}

/// Messages on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    #[serde(rename = "Time (Date)")]
    pub date: NaiveDate,
    #[serde(rename = "Number of Messages")]
    pub messages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayActivity {
    #[serde(rename = "Day of the Week")]
    pub weekday: String,
    #[serde(rename = "Number of Messages")]
    pub messages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthActivity {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Number of Messages")]
    pub messages: usize,
}

/// Weekday × hour-bucket message counts.
///
/// `counts[r][c]` is the number of messages sent on `weekdays[r]` within
/// `hour_buckets[c]`; combinations with no messages hold 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHeatmap {
    pub weekdays: Vec<String>,
    pub hour_buckets: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl ActivityHeatmap {
    /// Look up a single cell by its labels.  Unknown labels read as 0.
    pub fn get(&self, weekday: &str, hour_bucket: &str) -> usize {
        let row = self.weekdays.iter().position(|w| w == weekday);
        let col = self.hour_buckets.iter().position(|b| b == hour_bucket);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weekdays.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(author: &str, text: &str) -> MessageRecord {
        MessageRecord {
            author: author.to_string(),
            text: text.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_is_media_with_and_without_newline() {
        assert!(record("Alice", "<Media omitted>").is_media());
        assert!(record("Alice", "<Media omitted>\n").is_media());
        assert!(!record("Alice", "look <Media omitted>").is_media());
    }

    #[test]
    fn test_is_group_notification() {
        assert!(record(GROUP_NOTIFICATION, "Alice added Bob").is_group_notification());
        assert!(!record("Alice", "hi").is_group_notification());
    }

    #[test]
    fn test_scope_from_selection() {
        assert_eq!(Scope::from_selection("Overall"), Scope::Overall);
        assert_eq!(
            Scope::from_selection("Alice"),
            Scope::User("Alice".to_string())
        );
    }

    #[test]
    fn test_scope_matches() {
        let alice = record("Alice", "hi");
        assert!(Scope::Overall.matches(&alice));
        assert!(Scope::User("Alice".to_string()).matches(&alice));
        assert!(!Scope::User("Bob".to_string()).matches(&alice));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Overall.to_string(), "Overall");
        assert_eq!(Scope::User("Bob".to_string()).to_string(), "Bob");
    }

    #[test]
    fn test_row_serialises_with_column_names() {
        let row = UserActivity {
            user: "Alice".to_string(),
            messages: 3,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json[columns::USER_NAME], "Alice");
        assert_eq!(json[columns::NUMBER_OF_CHATS], 3);

        let day = WeekdayActivity {
            weekday: "Monday".to_string(),
            messages: 0,
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json[columns::DAY_OF_THE_WEEK], "Monday");
        assert_eq!(json[columns::NUMBER_OF_MESSAGES], 0);
    }

    #[test]
    fn test_heatmap_get_unknown_labels_is_zero() {
        let heatmap = ActivityHeatmap {
            weekdays: vec!["Monday".to_string()],
            hour_buckets: vec!["9-10".to_string()],
            counts: vec![vec![4]],
        };
        assert_eq!(heatmap.get("Monday", "9-10"), 4);
        assert_eq!(heatmap.get("Tuesday", "9-10"), 0);
        assert_eq!(heatmap.get("Monday", "10-11"), 0);
    }
}
