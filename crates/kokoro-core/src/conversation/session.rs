//! Transient chat session model.
//!
//! A [`ConversationSession`] lives only for the duration of one composition
//! session. It is owned exclusively by the conversation driver and is never
//! persisted on its own; on completion it is flattened into journal entry
//! content and discarded.

use super::turn::ConversationTurn;
use serde::{Deserialize, Serialize};

/// Lifecycle states of a companion chat session.
///
/// Legal transitions:
///
/// ```text
/// Idle -> Starting -> AwaitingUserTurn <-> AwaitingAiTurn
///                     AwaitingUserTurn / AwaitingAiTurn -> Closed
/// ```
///
/// `Closed` is terminal; a closed session rejects further turn appends so a
/// reply that lands after the user exits chat cannot corrupt an already
/// flattened transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatState {
    /// No session running.
    Idle,
    /// Seed analysis and opening AI turn in flight.
    Starting,
    /// Waiting for the user to type.
    AwaitingUserTurn,
    /// A reply request is in flight; user input is rejected.
    AwaitingAiTurn,
    /// Session ended; transcript flattened or discarded.
    Closed,
}

/// An ordered, append-only sequence of conversation turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSession {
    turns: Vec<ConversationTurn>,
}

impl ConversationSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the session.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Removes and returns the most recent turn.
    ///
    /// Used to roll back a user turn whose reply request failed, so failed
    /// turns never pollute the transcript.
    pub fn pop_last(&mut self) -> Option<ConversationTurn> {
        self.turns.pop()
    }

    /// Number of turns in the session.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the session has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The turns in append order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Flattens the session into journal entry content.
    ///
    /// Produces one `Me: ...` / `AI: ...` line per turn, newline-joined,
    /// in turn order.
    pub fn flatten(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.sender.transcript_label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
