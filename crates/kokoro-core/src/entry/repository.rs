//! Entry repository trait.
//!
//! Defines the interface for journal entry persistence operations.

use super::model::JournalEntry;
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// An abstract repository for managing journal entry persistence.
///
/// This trait defines the contract for persisting and retrieving journal
/// entries, decoupling the application's core logic from the specific storage
/// mechanism (e.g., TOML files, database, remote API).
///
/// The repository is the sole owner of entry state. Aggregation and insight
/// components only read snapshots via `list_all`; there is no secondary
/// index and a full scan per request is the intended access pattern at
/// personal-journal scale.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Finds an entry by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(JournalEntry))`: Entry found
    /// - `Ok(None)`: Entry not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, entry_id: &str) -> Result<Option<JournalEntry>>;

    /// Saves an entry to storage, inserting or replacing by id.
    async fn save(&self, entry: &JournalEntry) -> Result<()>;

    /// Deletes an entry from storage.
    ///
    /// Deleting an entry that does not exist is not an error.
    async fn delete(&self, entry_id: &str) -> Result<()>;

    /// Lists all stored entries, ordered by entry timestamp ascending.
    async fn list_all(&self) -> Result<Vec<JournalEntry>>;

    /// Subscribes to change notifications.
    ///
    /// The receiver observes a revision counter that is bumped on every
    /// successful `save` or `delete`. Consumers (dashboards, trend views)
    /// re-read the snapshot when the revision changes; the counter value
    /// itself carries no meaning beyond inequality.
    fn subscribe(&self) -> watch::Receiver<u64>;
}
