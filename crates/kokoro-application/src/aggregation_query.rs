//! Aggregation queries over the entry store.
//!
//! Thin use-case wrapper binding the pure aggregation engine to the
//! repository: reads one snapshot, supplies today's local date, and fixes
//! the per-day representative policy for each view so it never silently
//! mixes (the calendar uses first-entry-of-day, the trend views use score
//! averaging).

use chrono::Local;
use kokoro_core::aggregate::{self, AggregatedInsights, DayMoodPolicy};
use kokoro_core::entry::EntryRepository;
use kokoro_core::error::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Read-side service computing [`AggregatedInsights`] from the live store.
pub struct AggregationQuery {
    repository: Arc<dyn EntryRepository>,
}

impl AggregationQuery {
    /// Creates a new `AggregationQuery`.
    pub fn new(repository: Arc<dyn EntryRepository>) -> Self {
        Self { repository }
    }

    /// Aggregate for the calendar/dashboard view.
    ///
    /// Per-day representative policy: **first entry of the day**. Returns
    /// `None` when the store is empty; callers render an empty state.
    pub async fn dashboard(&self) -> Result<Option<AggregatedInsights>> {
        self.aggregate_with(DayMoodPolicy::FirstEntry).await
    }

    /// Aggregate for the trend/insight views.
    ///
    /// Per-day representative policy: **score average**, matching the
    /// weekly series ladder.
    pub async fn trends(&self) -> Result<Option<AggregatedInsights>> {
        self.aggregate_with(DayMoodPolicy::ScoreAverage).await
    }

    /// Change feed from the underlying store; the revision bumps whenever a
    /// re-aggregation would observe different data.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.repository.subscribe()
    }

    async fn aggregate_with(&self, policy: DayMoodPolicy) -> Result<Option<AggregatedInsights>> {
        let entries = self.repository.list_all().await?;
        Ok(aggregate::aggregate(
            &entries,
            policy,
            Local::now().date_naive(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryEntryRepository;
    use kokoro_core::entry::JournalEntry;

    #[tokio::test]
    async fn test_empty_store_yields_empty_state() {
        let repository = Arc::new(MemoryEntryRepository::new());
        let query = AggregationQuery::new(repository);
        assert!(query.dashboard().await.unwrap().is_none());
        assert!(query.trends().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dashboard_reflects_stored_entries() {
        let repository = Arc::new(MemoryEntryRepository::new());
        repository
            .save(&JournalEntry {
                id: "e1".to_string(),
                content: "a fine day".to_string(),
                entry_date: chrono::Utc::now().to_rfc3339(),
                mood_score: 6,
                sentiment: "positive".to_string(),
                emotion: "Happy".to_string(),
                ..JournalEntry::default()
            })
            .await
            .unwrap();

        let query = AggregationQuery::new(repository);
        let insights = query.dashboard().await.unwrap().unwrap();
        assert_eq!(insights.total_entries, 1);
        assert_eq!(insights.most_frequent_emotion, "Happy");
        assert_eq!(insights.weekly_mood_series.len(), 7);
    }
}
