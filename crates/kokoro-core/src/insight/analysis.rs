//! Per-entry analysis result.

use crate::taxonomy::{NEUTRAL_EMOTION, NEUTRAL_SENTIMENT};
use serde::{Deserialize, Serialize};

/// The structured analysis derived from one journal entry's text.
///
/// All four fields come from a single analysis pass; `emotion` and
/// `sentiment` are never populated from different calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAnalysis {
    /// Fine-grained emotion label (taxonomy vocabulary expected, not enforced)
    pub emotion: String,
    /// Coarse sentiment polarity label
    pub sentiment: String,
    /// Short prose summary of the entry
    pub summary: String,
    /// Bullet-point insights derived from the entry
    pub insights: Vec<String>,
}

impl EntryAnalysis {
    /// The deterministic neutral result.
    ///
    /// Returned for text under the analysis length floor and whenever the
    /// external service fails; analysis never surfaces an error to the user.
    pub fn neutral() -> Self {
        Self {
            emotion: NEUTRAL_EMOTION.to_string(),
            sentiment: NEUTRAL_SENTIMENT.to_string(),
            summary: String::new(),
            insights: Vec::new(),
        }
    }

    /// Sanity check on a service-provided analysis.
    ///
    /// A response that deserialized but carries blank labels is as useless
    /// as a malformed one; callers treat it as a service error.
    pub fn is_complete(&self) -> bool {
        !self.emotion.trim().is_empty() && !self.sentiment.trim().is_empty()
    }
}
