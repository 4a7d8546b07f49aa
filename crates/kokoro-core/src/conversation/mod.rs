//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `turn`: Conversation turn types (`TurnSender`, `ConversationTurn`)
//! - `session`: Transient chat session (`ConversationSession`, `ChatState`)

mod session;
mod turn;

// Re-export public API
pub use session::{ChatState, ConversationSession};
pub use turn::{ConversationTurn, TurnSender};
