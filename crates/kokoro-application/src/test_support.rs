//! Shared mocks for the use-case tests.

use async_trait::async_trait;
use kokoro_core::conversation::ConversationTurn;
use kokoro_core::entry::{EntryRepository, JournalEntry};
use kokoro_core::error::{KokoroError, Result};
use kokoro_core::insight::{BalanceInsight, ChatSeed, EntryAnalysis, InsightService};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, watch};

/// Scripted in-memory stand-in for the external insight service.
///
/// Every operation records a call count; responses are configured through
/// the builder methods. `chat_turn` pops scripted replies in order and can
/// be gated on a [`Notify`] to simulate an in-flight request.
pub struct MockInsightService {
    analysis: Mutex<Result<EntryAnalysis>>,
    opening_reply: Mutex<Result<String>>,
    turn_replies: Mutex<VecDeque<Result<String>>>,
    balance: Mutex<Result<BalanceInsight>>,
    sources: Mutex<Result<Vec<String>>>,
    triggers: Mutex<Result<Vec<String>>>,
    turn_gate: Mutex<Option<Arc<Notify>>>,
    analyze_count: AtomicUsize,
    chat_start_count: AtomicUsize,
    chat_turn_count: AtomicUsize,
    corpus_count: AtomicUsize,
}

fn unavailable() -> KokoroError {
    KokoroError::service_unavailable("connection refused")
}

impl MockInsightService {
    pub fn new() -> Self {
        Self {
            analysis: Mutex::new(Ok(EntryAnalysis::neutral())),
            opening_reply: Mutex::new(Ok("How was your day?".to_string())),
            turn_replies: Mutex::new(VecDeque::new()),
            balance: Mutex::new(Ok(BalanceInsight {
                narrative: "Life looks balanced.".to_string(),
                actionable_advice: vec!["Keep journaling".to_string()],
            })),
            sources: Mutex::new(Ok(vec!["Deadline pressure".to_string()])),
            triggers: Mutex::new(Ok(vec!["Poor sleep".to_string()])),
            turn_gate: Mutex::new(None),
            analyze_count: AtomicUsize::new(0),
            chat_start_count: AtomicUsize::new(0),
            chat_turn_count: AtomicUsize::new(0),
            corpus_count: AtomicUsize::new(0),
        }
    }

    pub fn with_analysis(self, analysis: EntryAnalysis) -> Self {
        *self.analysis.lock().unwrap() = Ok(analysis);
        self
    }

    pub fn with_analyze_failure(self) -> Self {
        *self.analysis.lock().unwrap() = Err(unavailable());
        self
    }

    pub fn with_opening_reply(self, reply: &str) -> Self {
        *self.opening_reply.lock().unwrap() = Ok(reply.to_string());
        self
    }

    pub fn with_opening_failure(self) -> Self {
        *self.opening_reply.lock().unwrap() = Err(unavailable());
        self
    }

    pub fn with_turn_replies(self, replies: Vec<Result<String>>) -> Self {
        *self.turn_replies.lock().unwrap() = replies.into();
        self
    }

    pub fn with_balance_failure(self) -> Self {
        *self.balance.lock().unwrap() = Err(unavailable());
        self
    }

    pub fn with_sources(self, sources: Vec<String>) -> Self {
        *self.sources.lock().unwrap() = Ok(sources);
        self
    }

    pub fn with_triggers_failure(self) -> Self {
        *self.triggers.lock().unwrap() = Err(KokoroError::service_response_invalid(
            "missing field `triggers`",
        ));
        self
    }

    /// Makes `chat_turn` block until the returned handle is notified.
    pub fn gate_chat_turn(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.turn_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_count.load(Ordering::SeqCst)
    }

    pub fn chat_turn_calls(&self) -> usize {
        self.chat_turn_count.load(Ordering::SeqCst)
    }

    pub fn corpus_calls(&self) -> usize {
        self.corpus_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightService for MockInsightService {
    async fn analyze(&self, _text: &str) -> Result<EntryAnalysis> {
        self.analyze_count.fetch_add(1, Ordering::SeqCst);
        self.analysis.lock().unwrap().clone()
    }

    async fn chat_start(&self, _seed: &ChatSeed) -> Result<String> {
        self.chat_start_count.fetch_add(1, Ordering::SeqCst);
        self.opening_reply.lock().unwrap().clone()
    }

    async fn chat_turn(&self, _history: &[ConversationTurn], _message: &str) -> Result<String> {
        self.chat_turn_count.fetch_add(1, Ordering::SeqCst);
        let gate = self.turn_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let scripted = self.turn_replies.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok("Tell me more.".to_string()))
    }

    async fn balance_insight(&self, _entries_json: &str) -> Result<BalanceInsight> {
        self.corpus_count.fetch_add(1, Ordering::SeqCst);
        self.balance.lock().unwrap().clone()
    }

    async fn negativity_sources(&self, _entries_json: &str) -> Result<Vec<String>> {
        self.corpus_count.fetch_add(1, Ordering::SeqCst);
        self.sources.lock().unwrap().clone()
    }

    async fn mood_triggers(&self, _entries_json: &str) -> Result<Vec<String>> {
        self.corpus_count.fetch_add(1, Ordering::SeqCst);
        self.triggers.lock().unwrap().clone()
    }
}

/// In-memory entry repository for tests.
pub struct MemoryEntryRepository {
    entries: Mutex<HashMap<String, JournalEntry>>,
    changes: watch::Sender<u64>,
}

impl MemoryEntryRepository {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            entries: Mutex::new(HashMap::new()),
            changes,
        }
    }
}

#[async_trait]
impl EntryRepository for MemoryEntryRepository {
    async fn find_by_id(&self, entry_id: &str) -> Result<Option<JournalEntry>> {
        Ok(self.entries.lock().unwrap().get(entry_id).cloned())
    }

    async fn save(&self, entry: &JournalEntry) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(entry.id.clone(), entry.clone());
        self.changes.send_modify(|rev| *rev += 1);
        Ok(())
    }

    async fn delete(&self, entry_id: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(entry_id);
        self.changes.send_modify(|rev| *rev += 1);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<JournalEntry>> {
        let mut entries: Vec<JournalEntry> =
            self.entries.lock().unwrap().values().cloned().collect();
        entries.sort_by(|a, b| a.entry_date.cmp(&b.entry_date));
        Ok(entries)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
