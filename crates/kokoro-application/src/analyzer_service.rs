//! Entry analyzer service.
//!
//! Turns raw entry text into an [`EntryAnalysis`] by calling the external
//! insight service, degrading to the deterministic neutral result whenever
//! the service cannot be used. Analysis failure is never user-visible.

use kokoro_core::error::{KokoroError, Result};
use kokoro_core::insight::{EntryAnalysis, InsightService};
use std::sync::Arc;

/// Minimum text length (in characters) for analysis to be meaningful.
///
/// Below this floor the analyzer short-circuits to the neutral result
/// without issuing any external call. This is a hard rule.
pub const MIN_ANALYZABLE_CHARS: usize = 10;

/// User-visible message for explicit analysis requests below the floor.
pub const TOO_SHORT_MESSAGE: &str =
    "Entry must be at least 10 characters long to provide meaningful insights.";

/// Derives the emotional profile of entry text.
///
/// The analyzer owns the orchestration-boundary policy for the analysis
/// endpoint: short text and every service failure produce the same neutral
/// fallback, so callers can treat [`analyze`](EntryAnalyzer::analyze) as
/// infallible.
pub struct EntryAnalyzer {
    service: Arc<dyn InsightService>,
}

impl EntryAnalyzer {
    /// Creates a new analyzer backed by the given service.
    pub fn new(service: Arc<dyn InsightService>) -> Self {
        Self { service }
    }

    /// Validates text for an explicit analysis submission.
    ///
    /// This is the user-visible counterpart of the silent short-text
    /// fallback: an explicit "analyze this" request on text below the floor
    /// is rejected with a `Validation` error instead of quietly degrading.
    pub fn ensure_analyzable(text: &str) -> Result<()> {
        if text.chars().count() < MIN_ANALYZABLE_CHARS {
            return Err(KokoroError::validation(TOO_SHORT_MESSAGE));
        }
        Ok(())
    }

    /// Analyzes entry text, never failing.
    ///
    /// - Text below [`MIN_ANALYZABLE_CHARS`]: neutral result, no external call.
    /// - Service reachable and response well-formed: the service's analysis.
    /// - Anything else (connection refused, malformed response, blank
    ///   labels): logged and degraded to the neutral result.
    pub async fn analyze(&self, text: &str) -> EntryAnalysis {
        if text.chars().count() < MIN_ANALYZABLE_CHARS {
            return EntryAnalysis::neutral();
        }

        match self.service.analyze(text).await {
            Ok(analysis) if analysis.is_complete() => analysis,
            Ok(_) => {
                tracing::warn!(
                    "[EntryAnalyzer] Service returned blank analysis labels, using neutral fallback"
                );
                EntryAnalysis::neutral()
            }
            Err(err) => {
                tracing::warn!(
                    "[EntryAnalyzer] Analysis failed ({}), using neutral fallback",
                    err
                );
                EntryAnalysis::neutral()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockInsightService;

    #[tokio::test]
    async fn test_short_text_short_circuits_without_a_call() {
        let service = Arc::new(MockInsightService::new());
        let analyzer = EntryAnalyzer::new(service.clone());

        let analysis = analyzer.analyze("too short").await;

        assert_eq!(analysis, EntryAnalysis::neutral());
        assert_eq!(service.analyze_calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_analysis_passes_through() {
        let service = Arc::new(MockInsightService::new().with_analysis(EntryAnalysis {
            emotion: "Joyful".to_string(),
            sentiment: "very positive".to_string(),
            summary: "A great day.".to_string(),
            insights: vec!["Finishing things lifts your mood".to_string()],
        }));
        let analyzer = EntryAnalyzer::new(service.clone());

        let analysis = analyzer.analyze("I finished my big project today!").await;

        assert_eq!(analysis.emotion, "Joyful");
        assert_eq!(service.analyze_calls(), 1);
    }

    #[tokio::test]
    async fn test_service_failure_degrades_to_neutral() {
        let service = Arc::new(MockInsightService::new().with_analyze_failure());
        let analyzer = EntryAnalyzer::new(service.clone());

        let analysis = analyzer.analyze("long enough text to analyze").await;

        assert_eq!(analysis, EntryAnalysis::neutral());
        assert_eq!(service.analyze_calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_labels_degrade_to_neutral() {
        let service = Arc::new(MockInsightService::new().with_analysis(EntryAnalysis {
            emotion: "".to_string(),
            sentiment: "positive".to_string(),
            summary: String::new(),
            insights: Vec::new(),
        }));
        let analyzer = EntryAnalyzer::new(service);

        let analysis = analyzer.analyze("long enough text to analyze").await;
        assert_eq!(analysis, EntryAnalysis::neutral());
    }

    #[test]
    fn test_ensure_analyzable_floor() {
        let err = EntryAnalyzer::ensure_analyzable("short").unwrap_err();
        assert!(err.is_validation());
        assert!(EntryAnalyzer::ensure_analyzable("long enough text").is_ok());
    }
}
