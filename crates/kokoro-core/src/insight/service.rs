//! External reasoning service trait.

use super::analysis::EntryAnalysis;
use super::model::{BalanceInsight, ChatSeed};
use crate::conversation::ConversationTurn;
use crate::error::Result;
use async_trait::async_trait;

/// The boundary to the external insight/reasoning service.
///
/// This trait is the only seam through which Kokoro talks to the reasoning
/// oracle; the HTTP implementation lives in the interaction crate and tests
/// substitute mocks. Every method issues exactly one request: there is no
/// automatic retry anywhere behind this trait, so a failed call can be
/// retried by the user without duplicate side effects.
///
/// # Error contract
///
/// Implementations must map connection-level failures to
/// [`KokoroError::ServiceUnavailable`] and malformed/incomplete response
/// bodies to [`KokoroError::ServiceResponseInvalid`]. Callers at the
/// orchestration boundary convert both to fallbacks or tagged results.
///
/// [`KokoroError::ServiceUnavailable`]: crate::error::KokoroError::ServiceUnavailable
/// [`KokoroError::ServiceResponseInvalid`]: crate::error::KokoroError::ServiceResponseInvalid
#[async_trait]
pub trait InsightService: Send + Sync {
    /// Analyzes one entry's text into an emotional profile.
    async fn analyze(&self, text: &str) -> Result<EntryAnalysis>;

    /// Requests the opening turn of a companion chat.
    async fn chat_start(&self, seed: &ChatSeed) -> Result<String>;

    /// Requests the next reply given the conversation so far.
    async fn chat_turn(&self, history: &[ConversationTurn], message: &str) -> Result<String>;

    /// Requests a balance-of-life reading over the serialized entry corpus.
    async fn balance_insight(&self, entries_json: &str) -> Result<BalanceInsight>;

    /// Requests the identified sources of negativity across the corpus.
    async fn negativity_sources(&self, entries_json: &str) -> Result<Vec<String>>;

    /// Requests the identified bad-mood triggers across the corpus.
    async fn mood_triggers(&self, entries_json: &str) -> Result<Vec<String>>;
}
