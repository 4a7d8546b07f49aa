//! Application wiring.
//!
//! `KokoroApp` assembles the default production stack: the TOML entry store
//! at `~/.kokoro` and the HTTP insight client from the resolved
//! configuration. The presentation layer holds one of these and hands chat
//! drivers out per composition session.

use crate::aggregation_query::AggregationQuery;
use crate::analyzer_service::EntryAnalyzer;
use crate::conversation_driver::ConversationDriver;
use crate::insight_orchestrator::InsightOrchestrator;
use crate::journal_service::JournalService;
use kokoro_core::entry::EntryRepository;
use kokoro_core::error::Result;
use kokoro_core::insight::InsightService;
use kokoro_infrastructure::TomlEntryRepository;
use kokoro_interaction::InsightApiClient;
use std::sync::Arc;

/// The wired-up application services.
pub struct KokoroApp {
    repository: Arc<dyn EntryRepository>,
    service: Arc<dyn InsightService>,
    analyzer: Arc<EntryAnalyzer>,
    pub journal: Arc<JournalService>,
    pub aggregation: Arc<AggregationQuery>,
    pub insights: Arc<InsightOrchestrator>,
}

impl KokoroApp {
    /// Bootstraps the default stack: `~/.kokoro` storage and the configured
    /// insight service endpoint.
    pub fn bootstrap() -> Result<Self> {
        let repository: Arc<dyn EntryRepository> = Arc::new(TomlEntryRepository::default_location()?);
        let service: Arc<dyn InsightService> = Arc::new(InsightApiClient::from_config());
        Ok(Self::with_components(repository, service))
    }

    /// Wires the services over explicit components (tests, alternate stores).
    pub fn with_components(
        repository: Arc<dyn EntryRepository>,
        service: Arc<dyn InsightService>,
    ) -> Self {
        let analyzer = Arc::new(EntryAnalyzer::new(service.clone()));
        let journal = Arc::new(JournalService::new(repository.clone(), analyzer.clone()));
        let aggregation = Arc::new(AggregationQuery::new(repository.clone()));
        let insights = Arc::new(InsightOrchestrator::new(
            repository.clone(),
            service.clone(),
        ));
        Self {
            repository,
            service,
            analyzer,
            journal,
            aggregation,
            insights,
        }
    }

    /// Creates a fresh chat driver for one composition session.
    ///
    /// Drivers are one-shot; the caller keeps it for the session and saves
    /// the flattened transcript through [`JournalService`] on close.
    pub fn new_conversation(&self) -> ConversationDriver {
        ConversationDriver::new(self.service.clone(), self.analyzer.clone())
    }

    /// The underlying entry store.
    pub fn repository(&self) -> &Arc<dyn EntryRepository> {
        &self.repository
    }
}
