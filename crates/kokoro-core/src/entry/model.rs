//! Journal entry domain model.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Title given to entries saved without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Category given to entries saved without one.
pub const DEFAULT_CATEGORY: &str = "feelings";

/// A single journal entry with its derived emotional profile.
///
/// `mood_score`, `sentiment` and `emotion` are always written together by
/// one analysis pass; they are never re-derived independently of each other.
/// Editing an entry re-runs analysis and overwrites all three (plus the
/// cached summary/insights) in a single save.
///
/// This is the "pure" domain model that business logic operates on,
/// independent of any specific storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry identifier (UUID format)
    pub id: String,
    /// Entry title, defaults to "Untitled"
    #[serde(default = "default_title")]
    pub title: String,
    /// Free text, or a flattened chat transcript when `is_chat` is set
    pub content: String,
    /// Timestamp when the entry was written (ISO 8601 format)
    pub entry_date: String,
    /// Mood score derived from the sentiment ladder at analysis time
    pub mood_score: u8,
    /// Coarse sentiment label from the analysis service
    pub sentiment: String,
    /// Fine-grained emotion label from the analysis service
    pub emotion: String,
    /// Free-form category label
    #[serde(default = "default_category")]
    pub category: String,
    /// Whether this entry was produced from a chat session
    #[serde(default)]
    pub is_chat: bool,
    /// Cached AI summary from the last analysis, if any
    #[serde(default)]
    pub summary: Option<String>,
    /// Cached AI insights from the last analysis
    #[serde(default)]
    pub insights: Vec<String>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for JournalEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: default_title(),
            content: String::new(),
            entry_date: String::new(),
            mood_score: 4,
            sentiment: crate::taxonomy::NEUTRAL_SENTIMENT.to_string(),
            emotion: crate::taxonomy::NEUTRAL_EMOTION.to_string(),
            category: default_category(),
            is_chat: false,
            summary: None,
            insights: Vec::new(),
        }
    }
}

impl JournalEntry {
    /// Returns the calendar day this entry belongs to, in the timestamp's
    /// own offset (the writer's local day).
    ///
    /// Returns `None` when the stored timestamp does not parse; day-granular
    /// views skip such entries rather than fail.
    pub fn local_date(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.entry_date)
            .ok()
            .map(|dt| dt.naive_local().date())
    }

    /// Counts whitespace-delimited tokens in the entry content.
    ///
    /// Works the same for plain text and flattened chat transcripts. The
    /// title is a separate attribute and is not counted.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
