//! Conversation turn types.

use serde::{Deserialize, Serialize};

/// Represents the sender of a turn in a companion chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSender {
    /// Turn written by the user.
    User,
    /// Turn written by the AI companion.
    Ai,
}

impl TurnSender {
    /// The prefix used when a session is flattened into entry content.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            TurnSender::User => "Me",
            TurnSender::Ai => "AI",
        }
    }
}

/// A single turn in a companion chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who wrote the turn.
    pub sender: TurnSender,
    /// The turn text.
    pub text: String,
}

impl ConversationTurn {
    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: TurnSender::User,
            text: text.into(),
        }
    }

    /// Creates an AI turn.
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: TurnSender::Ai,
            text: text.into(),
        }
    }
}
