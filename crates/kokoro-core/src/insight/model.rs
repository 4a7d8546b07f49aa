//! Narrative insight models.

use serde::{Deserialize, Serialize};

/// A "balance of life" reading over the whole entry corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceInsight {
    /// A gentle, encouraging paragraph summarizing the balance of life.
    pub narrative: String,
    /// Actionable bullet points for overcoming identified negativity.
    pub actionable_advice: Vec<String>,
}

/// Grounding context for the opening turn of a companion chat.
///
/// The seed text is the entry the user composed before entering chat mode;
/// the insights come from running entry analysis on that text first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSeed {
    /// The composed entry text the chat grows out of.
    pub text: String,
    /// Analyzer-derived insights used as conversation grounding.
    pub insights: Vec<String>,
}
