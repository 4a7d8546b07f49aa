//! Companion chat driver.
//!
//! One `ConversationDriver` owns one composition session's chat: it seeds
//! the conversation from the entry text's analysis, enforces strict turn
//! ordering (no two reply requests in flight), rolls a failed turn back out
//! of the transcript, and on close flattens the session into entry content.
//!
//! State machine:
//!
//! ```text
//! Idle -> Starting -> AwaitingUserTurn <-> AwaitingAiTurn
//!         Starting / AwaitingUserTurn / AwaitingAiTurn -> Closed
//! ```
//!
//! The driver is one-shot: `Closed` is terminal and a new composition
//! session gets a new driver. Exiting mid-reply is allowed; the in-flight
//! call's eventual result is discarded against a closed session so it can
//! never corrupt an already flattened transcript.

use crate::analyzer_service::EntryAnalyzer;
use kokoro_core::conversation::{ChatState, ConversationSession, ConversationTurn};
use kokoro_core::error::{KokoroError, Result};
use kokoro_core::insight::{ChatSeed, InsightService};
use std::sync::Arc;
use tokio::sync::Mutex;

struct DriverInner {
    state: ChatState,
    session: ConversationSession,
}

/// Drives one turn-based chat session with the AI companion.
pub struct ConversationDriver {
    service: Arc<dyn InsightService>,
    analyzer: Arc<EntryAnalyzer>,
    inner: Mutex<DriverInner>,
}

impl ConversationDriver {
    /// Creates an idle driver.
    pub fn new(service: Arc<dyn InsightService>, analyzer: Arc<EntryAnalyzer>) -> Self {
        Self {
            service,
            analyzer,
            inner: Mutex::new(DriverInner {
                state: ChatState::Idle,
                session: ConversationSession::new(),
            }),
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> ChatState {
        self.inner.lock().await.state
    }

    /// Snapshot of the transcript so far.
    pub async fn transcript(&self) -> ConversationSession {
        self.inner.lock().await.session.clone()
    }

    /// Enters chat mode from composed entry text and returns the opening
    /// AI turn.
    ///
    /// The seed text is analyzed first and its insights ground the
    /// conversation. Entering chat on empty text is a rejected transition
    /// with a user-visible message, not a silent no-op.
    ///
    /// # Errors
    ///
    /// - `SessionState` if the driver is not idle or the seed is empty
    /// - The service error if the opening request fails (the driver returns
    ///   to idle so the user can retry)
    pub async fn start(&self, seed_text: &str) -> Result<String> {
        {
            let mut inner = self.inner.lock().await;
            if inner.state != ChatState::Idle {
                return Err(KokoroError::session_state("Chat has already started."));
            }
            if seed_text.trim().is_empty() {
                return Err(KokoroError::session_state(
                    "Write something first, then start the chat.",
                ));
            }
            inner.state = ChatState::Starting;
        }

        // Analysis is infallible (neutral fallback) and runs outside the
        // lock; close() during this window is honored below.
        let analysis = self.analyzer.analyze(seed_text).await;
        let seed = ChatSeed {
            text: seed_text.to_string(),
            insights: analysis.insights,
        };

        let opening = self.service.chat_start(&seed).await;

        let mut inner = self.inner.lock().await;
        if inner.state == ChatState::Closed {
            return Err(KokoroError::session_state("Chat session already closed."));
        }
        match opening {
            Ok(reply) => {
                inner.session.append(ConversationTurn::ai(reply.clone()));
                inner.state = ChatState::AwaitingUserTurn;
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!("[ConversationDriver] Opening turn failed: {}", err);
                inner.state = ChatState::Idle;
                Err(err)
            }
        }
    }

    /// Submits a user turn and returns the AI reply.
    ///
    /// While a reply is in flight the state is `AwaitingAiTurn` and further
    /// submissions are rejected, so no two requests overlap within one
    /// session. On failure the just-appended user turn is rolled back;
    /// failed turns never pollute the transcript.
    ///
    /// # Errors
    ///
    /// - `SessionState` if no turn is currently awaited (including a reply
    ///   already in flight, or the session was closed mid-call)
    /// - `Validation` for empty input
    /// - The service error if the reply request fails
    pub async fn submit(&self, message: &str) -> Result<String> {
        let history = {
            let mut inner = self.inner.lock().await;
            match inner.state {
                ChatState::AwaitingUserTurn => {}
                ChatState::AwaitingAiTurn => {
                    return Err(KokoroError::session_state(
                        "A reply is already on its way.",
                    ));
                }
                _ => {
                    return Err(KokoroError::session_state("No active chat session."));
                }
            }
            if message.trim().is_empty() {
                return Err(KokoroError::validation("Message cannot be empty."));
            }

            let history = inner.session.turns().to_vec();
            inner.session.append(ConversationTurn::user(message));
            inner.state = ChatState::AwaitingAiTurn;
            history
        };

        let reply = self.service.chat_turn(&history, message).await;

        let mut inner = self.inner.lock().await;
        if inner.state == ChatState::Closed {
            // The user exited mid-call; the transcript was already flattened
            // (or discarded) and must not change now.
            return Err(KokoroError::session_state("Chat session already closed."));
        }
        match reply {
            Ok(reply) => {
                inner.session.append(ConversationTurn::ai(reply.clone()));
                inner.state = ChatState::AwaitingUserTurn;
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!(
                    "[ConversationDriver] Reply failed, rolling back user turn: {}",
                    err
                );
                inner.session.pop_last();
                inner.state = ChatState::AwaitingUserTurn;
                Err(err)
            }
        }
    }

    /// Exits chat mode.
    ///
    /// Returns the flattened transcript (`Me:` / `AI:` lines) when the
    /// session has at least one turn, `None` when there is nothing to keep.
    /// Closing is allowed at any point of an active session, including while
    /// a reply is in flight.
    pub async fn close(&self) -> Option<String> {
        let mut inner = self.inner.lock().await;
        match inner.state {
            ChatState::Starting | ChatState::AwaitingUserTurn | ChatState::AwaitingAiTurn => {
                inner.state = ChatState::Closed;
                if inner.session.is_empty() {
                    None
                } else {
                    Some(inner.session.flatten())
                }
            }
            ChatState::Idle | ChatState::Closed => None,
        }
    }
}
