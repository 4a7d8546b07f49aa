//! Aggregation engine.
//!
//! Consumes a snapshot of the entry store and computes the derived,
//! never-persisted [`AggregatedInsights`]: per-day representative moods, the
//! trailing-7-day trend series, the emotion-frequency histogram, and the
//! corpus totals. Everything here is a pure function of its inputs; the
//! caller supplies `today` so the weekly window is deterministic.

use crate::entry::JournalEntry;
use crate::taxonomy::{self, NO_DATA_SCORE};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a day's single representative emotion is chosen when the day has
/// more than one entry.
///
/// Both policies are in use by different views; a given call site picks one
/// and keeps it stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayMoodPolicy {
    /// The emotion of the day's first entry (by entry timestamp).
    FirstEntry,
    /// The day's scores averaged, rounded, and mapped back through the
    /// taxonomy bands.
    ScoreAverage,
}

/// One emotion label and how often it occurs across the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

/// A day's representative mood for calendar views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMood {
    pub day: NaiveDate,
    pub emotion: String,
    pub score: u8,
}

/// One point of the trailing-7-day trend series.
///
/// `average_score` is [`NO_DATA_SCORE`] (0) for days with no entries; valid
/// mood bands start at 1, so consumers must branch on the sentinel before
/// treating the value as a mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMoodPoint {
    pub day: NaiveDate,
    pub average_score: u8,
}

/// The derived statistics over one snapshot of the entry store.
///
/// Recomputed in full on every request; nothing here is incremental and
/// nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedInsights {
    pub total_entries: usize,
    pub total_words: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    /// Emotion histogram in first-encountered order.
    pub emotion_frequency: Vec<EmotionCount>,
    /// Argmax over `emotion_frequency`; ties break to the first-seen label.
    pub most_frequent_emotion: String,
    /// Per-day representative moods, ascending by day.
    pub daily_moods: Vec<DailyMood>,
    /// Exactly 7 points for the trailing week ending `today`, inclusive.
    pub weekly_mood_series: Vec<WeeklyMoodPoint>,
}

/// The emotion an entry contributes to the histogram: the stored label, or
/// the band label derived from its score when the label is absent.
fn effective_emotion(entry: &JournalEntry) -> String {
    let label = entry.emotion.trim();
    if label.is_empty() {
        taxonomy::emotion_for_score(entry.mood_score).to_string()
    } else {
        label.to_string()
    }
}

/// Mean of the given scores, rounded to the nearest band.
fn rounded_mean(scores: &[u8]) -> u8 {
    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    (sum as f64 / scores.len() as f64).round() as u8
}

/// Groups parseable entries by their writer-local calendar day.
///
/// Entries whose timestamp does not parse are excluded here but still count
/// toward the corpus totals computed elsewhere.
fn group_by_day(
    entries: &[JournalEntry],
) -> BTreeMap<NaiveDate, Vec<(DateTime<FixedOffset>, &JournalEntry)>> {
    let mut days: BTreeMap<NaiveDate, Vec<(DateTime<FixedOffset>, &JournalEntry)>> =
        BTreeMap::new();
    for entry in entries {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&entry.entry_date) {
            days.entry(timestamp.naive_local().date())
                .or_default()
                .push((timestamp, entry));
        }
    }
    for bucket in days.values_mut() {
        bucket.sort_by_key(|(timestamp, _)| *timestamp);
    }
    days
}

/// Computes the full aggregate over an entry snapshot.
///
/// Returns `None` for an empty snapshot; callers render an empty state
/// rather than a zeroed report. The same entries always produce the same
/// output for a given `policy` and `today`.
pub fn aggregate(
    entries: &[JournalEntry],
    policy: DayMoodPolicy,
    today: NaiveDate,
) -> Option<AggregatedInsights> {
    if entries.is_empty() {
        return None;
    }

    let total_entries = entries.len();
    let total_words = entries.iter().map(JournalEntry::word_count).sum();
    let positive_count = entries.iter().filter(|e| taxonomy::is_positive(e)).count();
    let negative_count = entries.iter().filter(|e| taxonomy::is_negative(e)).count();

    // Histogram in first-encountered order; the order is the tie-break rule
    // for most_frequent_emotion, so a map type is not an option here.
    let mut emotion_frequency: Vec<EmotionCount> = Vec::new();
    for entry in entries {
        let emotion = effective_emotion(entry);
        match emotion_frequency.iter_mut().find(|c| c.emotion == emotion) {
            Some(existing) => existing.count += 1,
            None => emotion_frequency.push(EmotionCount { emotion, count: 1 }),
        }
    }
    // Strictly-greater scan: on equal counts the first-seen label wins
    // (max_by_key would return the last).
    let mut most_frequent_emotion = taxonomy::NEUTRAL_EMOTION.to_string();
    let mut best_count = 0;
    for entry_count in &emotion_frequency {
        if entry_count.count > best_count {
            best_count = entry_count.count;
            most_frequent_emotion = entry_count.emotion.clone();
        }
    }

    let days = group_by_day(entries);

    let daily_moods = days
        .iter()
        .map(|(day, bucket)| {
            let (emotion, score) = match policy {
                DayMoodPolicy::FirstEntry => {
                    let (_, first) = bucket[0];
                    (effective_emotion(first), first.mood_score)
                }
                DayMoodPolicy::ScoreAverage => {
                    let scores: Vec<u8> = bucket.iter().map(|(_, e)| e.mood_score).collect();
                    let mean = rounded_mean(&scores);
                    (taxonomy::emotion_for_score(mean).to_string(), mean)
                }
            };
            DailyMood {
                day: *day,
                emotion,
                score,
            }
        })
        .collect();

    let weekly_mood_series = weekly_mood_series(&days, today);

    Some(AggregatedInsights {
        total_entries,
        total_words,
        positive_count,
        negative_count,
        emotion_frequency,
        most_frequent_emotion,
        daily_moods,
        weekly_mood_series,
    })
}

/// The trailing-7-day series ending `today`, inclusive.
///
/// Uses the same score-averaging ladder as [`DayMoodPolicy::ScoreAverage`];
/// days without entries report [`NO_DATA_SCORE`].
fn weekly_mood_series(
    days: &BTreeMap<NaiveDate, Vec<(DateTime<FixedOffset>, &JournalEntry)>>,
    today: NaiveDate,
) -> Vec<WeeklyMoodPoint> {
    (0..7)
        .map(|offset| {
            let day = today - Duration::days(6 - offset);
            let average_score = days
                .get(&day)
                .map(|bucket| {
                    let scores: Vec<u8> = bucket.iter().map(|(_, e)| e.mood_score).collect();
                    rounded_mean(&scores)
                })
                .unwrap_or(NO_DATA_SCORE);
            WeeklyMoodPoint { day, average_score }
        })
        .collect()
}
