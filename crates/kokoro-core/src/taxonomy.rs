//! Mood taxonomy: the static mapping between emotion labels, numeric mood
//! scores, and display categories.
//!
//! Two independent scoring ladders live here on purpose:
//!
//! - [`score_for_emotion`] maps a categorical emotion label to its band.
//! - [`score_for_sentiment`] maps a coarse sentiment keyword to a score.
//!
//! The ladders disagree at band edges (e.g. "Calm" sits in band 4 while a
//! "positive"-sentiment entry scores 6). They feed different views and are
//! deliberately not unified; see DESIGN.md.

use crate::entry::JournalEntry;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lowest valid mood score. Scores below this are sentinels, not moods.
pub const MIN_MOOD_SCORE: u8 = 1;

/// Highest valid mood score (top of the sentiment ladder).
pub const MAX_MOOD_SCORE: u8 = 8;

/// Sentinel for "no entries on this day" in aggregated series.
///
/// Consumers must branch on this before mapping a score to an emotion;
/// it is never a valid mood.
pub const NO_DATA_SCORE: u8 = 0;

/// Canonical neutral emotion label, used by every fallback path.
pub const NEUTRAL_EMOTION: &str = "Neutral";

/// Canonical neutral sentiment label, used by every fallback path.
pub const NEUTRAL_SENTIMENT: &str = "neutral";

/// One row of the taxonomy table: an emotion label, its score band, and the
/// display key views render with (no per-view switch statements).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionBand {
    pub label: &'static str,
    pub score: u8,
    pub display_key: &'static str,
}

/// The full taxonomy table.
///
/// Bands are many-to-one: several labels share a score. The first label of
/// each band is the canonical one returned by [`emotion_for_score`].
pub const EMOTION_BANDS: &[EmotionBand] = &[
    EmotionBand { label: "Joyful", score: 6, display_key: "😄" },
    EmotionBand { label: "Happy", score: 5, display_key: "😊" },
    EmotionBand { label: "Excited", score: 5, display_key: "😃" },
    EmotionBand { label: "Grateful", score: 5, display_key: "😍" },
    EmotionBand { label: "Calm", score: 4, display_key: "😌" },
    EmotionBand { label: "Content", score: 4, display_key: "🙂" },
    EmotionBand { label: "Angry", score: 3, display_key: "😠" },
    EmotionBand { label: "Sad", score: 2, display_key: "😔" },
    EmotionBand { label: "Anxious", score: 2, display_key: "😟" },
    EmotionBand { label: "Worried", score: 2, display_key: "😧" },
    EmotionBand { label: "Disappointed", score: 2, display_key: "😞" },
    EmotionBand { label: "Lonely", score: 2, display_key: "🥺" },
    EmotionBand { label: "Apathetic", score: 1, display_key: "😶" },
    EmotionBand { label: "Bored", score: 1, display_key: "🥱" },
    EmotionBand { label: "Tired", score: 1, display_key: "😴" },
    EmotionBand { label: "Neutral", score: 1, display_key: "😐" },
];

/// Case-insensitive label lookup into [`EMOTION_BANDS`].
static BAND_BY_LABEL: Lazy<HashMap<String, &'static EmotionBand>> = Lazy::new(|| {
    EMOTION_BANDS
        .iter()
        .map(|band| (band.label.to_lowercase(), band))
        .collect()
});

/// Returns the score band for an emotion label.
///
/// Unknown or unrecognized labels map to the neutral band; this function
/// never fails.
pub fn score_for_emotion(emotion: &str) -> u8 {
    BAND_BY_LABEL
        .get(&emotion.trim().to_lowercase())
        .map(|band| band.score)
        .unwrap_or_else(|| score_for_emotion_label(NEUTRAL_EMOTION))
}

fn score_for_emotion_label(label: &str) -> u8 {
    BAND_BY_LABEL
        .get(&label.to_lowercase())
        .map(|band| band.score)
        .unwrap_or(MIN_MOOD_SCORE)
}

/// Returns the canonical emotion label for a mood score.
///
/// Bands are many-to-one, so this maps back to the band's canonical label,
/// not necessarily the label the score was derived from. Scores above the
/// top emotion band (the sentiment ladder reaches 8) clamp to "Joyful";
/// the no-data sentinel and band 1 both map to "Neutral".
pub fn emotion_for_score(score: u8) -> &'static str {
    match score {
        s if s >= 6 => "Joyful",
        5 => "Happy",
        4 => "Calm",
        3 => "Angry",
        2 => "Sad",
        _ => NEUTRAL_EMOTION,
    }
}

/// Returns the display key for an emotion label, falling back to the
/// neutral band's key for unknown labels.
pub fn display_key_for_emotion(emotion: &str) -> &'static str {
    BAND_BY_LABEL
        .get(&emotion.trim().to_lowercase())
        .map(|band| band.display_key)
        .unwrap_or("😐")
}

/// Maps a sentiment keyword to a mood score.
///
/// This is the second, independent scoring ladder: very-positive → 8,
/// positive → 6, very-negative → 2, negative → 3, anything else → 4.
/// Containment checks run most-specific first so "very positive" is not
/// swallowed by the "positive" arm.
pub fn score_for_sentiment(sentiment: &str) -> u8 {
    let normalized = sentiment.trim().to_lowercase().replace('-', " ");
    if normalized.contains("very positive") {
        8
    } else if normalized.contains("very negative") {
        2
    } else if normalized.contains("positive") {
        6
    } else if normalized.contains("negative") {
        3
    } else {
        4
    }
}

/// Whether an entry counts as positive.
///
/// Defined on the sentiment field when present (string containment), else
/// falls back to the score threshold (score > 5). Both paths are load-bearing
/// for aggregation; keep them in agreement with [`is_negative`].
pub fn is_positive(entry: &JournalEntry) -> bool {
    if !entry.sentiment.trim().is_empty() {
        entry.sentiment.to_lowercase().contains("positive")
    } else {
        entry.mood_score > 5
    }
}

/// Whether an entry counts as negative.
///
/// Sentiment containment when present, else score < 4.
pub fn is_negative(entry: &JournalEntry) -> bool {
    if !entry.sentiment.trim().is_empty() {
        entry.sentiment.to_lowercase().contains("negative")
    } else {
        entry.mood_score < 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::JournalEntry;

    fn entry_with(sentiment: &str, mood_score: u8) -> JournalEntry {
        JournalEntry {
            sentiment: sentiment.to_string(),
            mood_score,
            ..JournalEntry::default()
        }
    }

    #[test]
    fn test_every_label_round_trips_through_its_band() {
        for band in EMOTION_BANDS {
            let score = score_for_emotion(band.label);
            assert_eq!(score, band.score, "band score for {}", band.label);
            // Mapping back lands on the band's canonical label, which must
            // itself score into the same band.
            let canonical = emotion_for_score(score);
            assert_eq!(
                score_for_emotion(canonical),
                band.score,
                "canonical label {} for {}",
                canonical,
                band.label
            );
        }
    }

    #[test]
    fn test_unknown_emotion_maps_to_neutral_band() {
        assert_eq!(score_for_emotion("Flabbergasted"), 1);
        assert_eq!(score_for_emotion(""), 1);
        assert_eq!(display_key_for_emotion("Flabbergasted"), "😐");
    }

    #[test]
    fn test_emotion_lookup_is_case_insensitive() {
        assert_eq!(score_for_emotion("joyful"), 6);
        assert_eq!(score_for_emotion("GRATEFUL"), 5);
    }

    #[test]
    fn test_sentiment_ladder() {
        assert_eq!(score_for_sentiment("very positive"), 8);
        assert_eq!(score_for_sentiment("positive"), 6);
        assert_eq!(score_for_sentiment("neutral"), 4);
        assert_eq!(score_for_sentiment("negative"), 3);
        assert_eq!(score_for_sentiment("very negative"), 2);
        // Hyphenated and mixed-case variants normalize first.
        assert_eq!(score_for_sentiment("Very-Positive"), 8);
        assert_eq!(score_for_sentiment("somewhat negative"), 3);
        assert_eq!(score_for_sentiment(""), 4);
    }

    #[test]
    fn test_emotion_for_score_clamps_and_handles_sentinel() {
        assert_eq!(emotion_for_score(8), "Joyful");
        assert_eq!(emotion_for_score(7), "Joyful");
        assert_eq!(emotion_for_score(NO_DATA_SCORE), NEUTRAL_EMOTION);
        assert_eq!(emotion_for_score(1), NEUTRAL_EMOTION);
    }

    #[test]
    fn test_positivity_uses_sentiment_when_present() {
        assert!(is_positive(&entry_with("very positive", 1)));
        assert!(is_negative(&entry_with("very negative", 8)));
        assert!(!is_positive(&entry_with("neutral", 8)));
        assert!(!is_negative(&entry_with("neutral", 1)));
    }

    #[test]
    fn test_positivity_falls_back_to_score_thresholds() {
        assert!(is_positive(&entry_with("", 6)));
        assert!(!is_positive(&entry_with("", 5)));
        assert!(is_negative(&entry_with("", 3)));
        assert!(!is_negative(&entry_with("", 4)));
    }
}
