//! On-demand narrative insights over the whole journal.
//!
//! Each operation serializes the current entry snapshot, issues exactly one
//! service call, and surfaces any failure as a tagged [`InsightReport`]
//! instead of an error — the presentation layer only ever branches on
//! `success`. Results are not cached: re-opening the same insight re-issues
//! the call.

use kokoro_core::entry::{EntryRepository, JournalEntry};
use kokoro_core::error::Result;
use kokoro_core::insight::{BalanceInsight, InsightService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tagged outcome of one insight request.
///
/// `success` is true iff `data` is present; `error` carries a user-facing
/// message otherwise. Never constructed half-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> InsightReport<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// The slice of an entry the reasoning service needs; cached AI output and
/// internal ids stay local.
#[derive(Serialize)]
struct CorpusEntry<'a> {
    title: &'a str,
    content: &'a str,
    emotion: &'a str,
    sentiment: &'a str,
    entry_date: &'a str,
}

impl<'a> From<&'a JournalEntry> for CorpusEntry<'a> {
    fn from(entry: &'a JournalEntry) -> Self {
        Self {
            title: &entry.title,
            content: &entry.content,
            emotion: &entry.emotion,
            sentiment: &entry.sentiment,
            entry_date: &entry.entry_date,
        }
    }
}

/// Drives the corpus-level insight endpoints.
pub struct InsightOrchestrator {
    repository: Arc<dyn EntryRepository>,
    service: Arc<dyn InsightService>,
}

impl InsightOrchestrator {
    /// Creates a new `InsightOrchestrator`.
    pub fn new(repository: Arc<dyn EntryRepository>, service: Arc<dyn InsightService>) -> Self {
        Self {
            repository,
            service,
        }
    }

    /// Balance-of-life narrative plus actionable advice.
    pub async fn balance_of_life(&self) -> InsightReport<BalanceInsight> {
        let corpus = match self.corpus_json().await {
            Ok(Some(json)) => json,
            Ok(None) => return InsightReport::failure(NO_ENTRIES_MESSAGE),
            Err(err) => return InsightReport::failure(err.to_string()),
        };

        match self.service.balance_insight(&corpus).await {
            Ok(insight) if !insight.narrative.trim().is_empty() => InsightReport::ok(insight),
            Ok(_) => InsightReport::failure("The service returned an empty insight."),
            Err(err) => {
                tracing::warn!("[InsightOrchestrator] Balance insight failed: {}", err);
                InsightReport::failure(err.to_string())
            }
        }
    }

    /// Identified sources of negativity across the journal.
    pub async fn negativity_sources(&self) -> InsightReport<Vec<String>> {
        let corpus = match self.corpus_json().await {
            Ok(Some(json)) => json,
            Ok(None) => return InsightReport::failure(NO_ENTRIES_MESSAGE),
            Err(err) => return InsightReport::failure(err.to_string()),
        };

        match self.service.negativity_sources(&corpus).await {
            Ok(sources) if !sources.is_empty() => InsightReport::ok(sources),
            Ok(_) => InsightReport::failure("No sources of negativity were identified."),
            Err(err) => {
                tracing::warn!("[InsightOrchestrator] Negativity sources failed: {}", err);
                InsightReport::failure(err.to_string())
            }
        }
    }

    /// Identified bad-mood triggers across the journal.
    pub async fn mood_triggers(&self) -> InsightReport<Vec<String>> {
        let corpus = match self.corpus_json().await {
            Ok(Some(json)) => json,
            Ok(None) => return InsightReport::failure(NO_ENTRIES_MESSAGE),
            Err(err) => return InsightReport::failure(err.to_string()),
        };

        match self.service.mood_triggers(&corpus).await {
            Ok(triggers) if !triggers.is_empty() => InsightReport::ok(triggers),
            Ok(_) => InsightReport::failure("No mood triggers were identified."),
            Err(err) => {
                tracing::warn!("[InsightOrchestrator] Mood triggers failed: {}", err);
                InsightReport::failure(err.to_string())
            }
        }
    }

    /// Serializes the entry snapshot for the service; `None` for an empty
    /// store (short-circuits before any call goes out).
    async fn corpus_json(&self) -> Result<Option<String>> {
        let entries = self.repository.list_all().await?;
        if entries.is_empty() {
            return Ok(None);
        }
        let corpus: Vec<CorpusEntry> = entries.iter().map(CorpusEntry::from).collect();
        Ok(Some(serde_json::to_string(&corpus)?))
    }
}

const NO_ENTRIES_MESSAGE: &str = "Write a few journal entries first to unlock insights.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryEntryRepository, MockInsightService};

    async fn seeded_repository() -> Arc<MemoryEntryRepository> {
        let repository = Arc::new(MemoryEntryRepository::new());
        repository
            .save(&JournalEntry {
                id: "e1".to_string(),
                content: "Work was heavy again today.".to_string(),
                entry_date: "2026-08-05T20:00:00Z".to_string(),
                mood_score: 3,
                sentiment: "negative".to_string(),
                emotion: "Anxious".to_string(),
                ..JournalEntry::default()
            })
            .await
            .unwrap();
        repository
    }

    #[tokio::test]
    async fn test_empty_store_short_circuits_without_a_call() {
        let repository = Arc::new(MemoryEntryRepository::new());
        let service = Arc::new(MockInsightService::new());
        let orchestrator = InsightOrchestrator::new(repository, service.clone());

        let report = orchestrator.balance_of_life().await;

        assert!(!report.success);
        assert!(report.error.unwrap().contains("journal entries first"));
        assert_eq!(service.corpus_calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_balance_report() {
        let repository = seeded_repository().await;
        let service = Arc::new(MockInsightService::new());
        let orchestrator = InsightOrchestrator::new(repository, service.clone());

        let report = orchestrator.balance_of_life().await;

        assert!(report.success);
        assert!(report.error.is_none());
        let insight = report.data.unwrap();
        assert_eq!(insight.narrative, "Life looks balanced.");
        assert_eq!(service.corpus_calls(), 1);
    }

    #[tokio::test]
    async fn test_service_failure_is_tagged_not_thrown() {
        let repository = seeded_repository().await;
        let service = Arc::new(MockInsightService::new().with_balance_failure());
        let orchestrator = InsightOrchestrator::new(repository, service);

        let report = orchestrator.balance_of_life().await;

        assert!(!report.success);
        assert!(report.data.is_none());
        assert!(report.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_sources_count_as_failure() {
        let repository = seeded_repository().await;
        let service = Arc::new(MockInsightService::new().with_sources(Vec::new()));
        let orchestrator = InsightOrchestrator::new(repository, service);

        let report = orchestrator.negativity_sources().await;
        assert!(!report.success);
    }

    #[tokio::test]
    async fn test_invalid_response_is_tagged_for_triggers() {
        let repository = seeded_repository().await;
        let service = Arc::new(MockInsightService::new().with_triggers_failure());
        let orchestrator = InsightOrchestrator::new(repository, service);

        let report = orchestrator.mood_triggers().await;
        assert!(!report.success);
        assert!(report.error.unwrap().contains("triggers"));
    }

    #[tokio::test]
    async fn test_reports_are_not_cached_between_calls() {
        let repository = seeded_repository().await;
        let service = Arc::new(MockInsightService::new());
        let orchestrator = InsightOrchestrator::new(repository, service.clone());

        orchestrator.mood_triggers().await;
        orchestrator.mood_triggers().await;
        assert_eq!(service.corpus_calls(), 2);
    }
}
