//! Journal entry use cases.
//!
//! `JournalService` coordinates the analyzer and the entry repository so an
//! entry is only ever persisted with a complete emotional profile: analysis
//! runs first, then one repository save. From the caller's perspective the
//! two are a single operation; there is no observable half-written entry.

use crate::analyzer_service::EntryAnalyzer;
use kokoro_core::entry::{DEFAULT_CATEGORY, DEFAULT_TITLE, EntryRepository, JournalEntry};
use kokoro_core::error::{KokoroError, Result};
use kokoro_core::insight::EntryAnalysis;
use kokoro_core::taxonomy;
use std::sync::Arc;
use uuid::Uuid;

/// Input for creating a journal entry.
#[derive(Debug, Clone, Default)]
pub struct NewEntryRequest {
    /// Optional title; blank or missing falls back to "Untitled".
    pub title: Option<String>,
    /// Entry text, or a flattened chat transcript.
    pub content: String,
    /// Optional category; missing falls back to "feelings".
    pub category: Option<String>,
    /// Whether the content came from a companion chat session.
    pub is_chat: bool,
}

/// Use case service for creating, editing and deleting journal entries.
pub struct JournalService {
    repository: Arc<dyn EntryRepository>,
    analyzer: Arc<EntryAnalyzer>,
}

impl JournalService {
    /// Creates a new `JournalService`.
    pub fn new(repository: Arc<dyn EntryRepository>, analyzer: Arc<EntryAnalyzer>) -> Self {
        Self {
            repository,
            analyzer,
        }
    }

    /// Creates and persists a new entry from composed content.
    ///
    /// Runs analysis (with its silent fallback), derives the mood score from
    /// the sentiment ladder, and saves. The entry reaches storage fully
    /// analyzed or not at all.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for empty content, or a storage error if
    /// the save fails.
    pub async fn create_entry(&self, request: NewEntryRequest) -> Result<JournalEntry> {
        if request.content.trim().is_empty() {
            return Err(KokoroError::validation("Cannot save an empty entry."));
        }

        let analysis = self.analyzer.analyze(&request.content).await;
        let entry = self.build_entry(request, &analysis);

        self.repository.save(&entry).await?;
        tracing::info!(
            "[JournalService] Created entry {} (emotion: {}, mood: {})",
            entry.id,
            entry.emotion,
            entry.mood_score
        );
        Ok(entry)
    }

    /// Re-saves an existing entry with new content.
    ///
    /// Editing re-runs analysis and overwrites the entry's mood score,
    /// sentiment, emotion, summary and insights in a single save; the id,
    /// timestamp and chat flag are preserved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry has the given id.
    pub async fn update_entry(
        &self,
        entry_id: &str,
        title: Option<String>,
        content: String,
    ) -> Result<JournalEntry> {
        let mut entry = self
            .repository
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| KokoroError::not_found("entry", entry_id))?;

        if content.trim().is_empty() {
            return Err(KokoroError::validation("Cannot save an empty entry."));
        }

        let analysis = self.analyzer.analyze(&content).await;

        if let Some(title) = title {
            entry.title = normalize_title(Some(title));
        }
        entry.content = content;
        entry.mood_score = taxonomy::score_for_sentiment(&analysis.sentiment);
        entry.sentiment = analysis.sentiment.clone();
        entry.emotion = analysis.emotion.clone();
        entry.summary = non_blank(&analysis.summary);
        entry.insights = analysis.insights.clone();

        self.repository.save(&entry).await?;
        tracing::info!("[JournalService] Updated entry {}", entry.id);
        Ok(entry)
    }

    /// Deletes an entry by id.
    pub async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        self.repository.delete(entry_id).await?;
        tracing::info!("[JournalService] Deleted entry {}", entry_id);
        Ok(())
    }

    /// Returns the full entry snapshot, ordered by timestamp.
    pub async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        self.repository.list_all().await
    }

    /// Analyzes text on explicit user request, without saving anything.
    ///
    /// Unlike the save path, a submission below the length floor is rejected
    /// with a user-visible `Validation` error rather than silently degraded.
    pub async fn analyze_preview(&self, text: &str) -> Result<EntryAnalysis> {
        EntryAnalyzer::ensure_analyzable(text)?;
        Ok(self.analyzer.analyze(text).await)
    }

    fn build_entry(&self, request: NewEntryRequest, analysis: &EntryAnalysis) -> JournalEntry {
        JournalEntry {
            id: Uuid::new_v4().to_string(),
            title: normalize_title(request.title),
            content: request.content,
            entry_date: chrono::Utc::now().to_rfc3339(),
            mood_score: taxonomy::score_for_sentiment(&analysis.sentiment),
            sentiment: analysis.sentiment.clone(),
            emotion: analysis.emotion.clone(),
            category: request
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            is_chat: request.is_chat,
            summary: non_blank(&analysis.summary),
            insights: analysis.insights.clone(),
        }
    }
}

fn normalize_title(title: Option<String>) -> String {
    title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
