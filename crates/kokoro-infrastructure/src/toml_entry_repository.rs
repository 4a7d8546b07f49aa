//! TOML-based EntryRepository implementation

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use kokoro_core::entry::{EntryRepository, JournalEntry};
use kokoro_core::error::Result;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// A repository implementation storing journal entries as TOML files.
///
/// Each entry is one file; writes go through [`AtomicTomlFile`] so an entry
/// is never observable half-written. A `watch` channel carries a revision
/// counter that is bumped on every successful mutation, which is how
/// dashboard/trend consumers learn to re-read their snapshot.
pub struct TomlEntryRepository {
    base_dir: PathBuf,
    changes: watch::Sender<u64>,
}

impl TomlEntryRepository {
    /// Creates a new `TomlEntryRepository` with the specified base directory.
    ///
    /// The directory structure will be created if it doesn't exist:
    /// ```text
    /// base_dir/
    /// └── entries/
    ///     ├── entry-id-1.toml
    ///     └── entry-id-2.toml
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let entries_dir = base_dir.join("entries");
        fs::create_dir_all(&entries_dir)?;

        let (changes, _) = watch::channel(0);
        Ok(Self { base_dir, changes })
    }

    /// Creates a `TomlEntryRepository` at the default location (~/.kokoro).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or if
    /// the directory structure cannot be created.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| kokoro_core::KokoroError::io("failed to get home directory"))?;
        Self::new(home_dir.join(".kokoro"))
    }

    /// Returns the file path for a given entry ID.
    fn entry_file_path(&self, entry_id: &str) -> PathBuf {
        self.base_dir
            .join("entries")
            .join(format!("{}.toml", entry_id))
    }

    fn entry_file(&self, entry_id: &str) -> AtomicTomlFile<JournalEntry> {
        AtomicTomlFile::new(self.entry_file_path(entry_id))
    }

    fn bump_revision(&self) {
        self.changes.send_modify(|rev| *rev += 1);
    }

    /// Orders two entries by timestamp, tolerating unparseable stamps.
    fn compare_by_date(a: &JournalEntry, b: &JournalEntry) -> Ordering {
        use chrono::DateTime;
        match (
            DateTime::parse_from_rfc3339(&a.entry_date),
            DateTime::parse_from_rfc3339(&b.entry_date),
        ) {
            (Ok(da), Ok(db)) => da.cmp(&db),
            // If parsing fails, fall back to string comparison
            _ => a.entry_date.cmp(&b.entry_date),
        }
    }
}

#[async_trait]
impl EntryRepository for TomlEntryRepository {
    async fn find_by_id(&self, entry_id: &str) -> Result<Option<JournalEntry>> {
        self.entry_file(entry_id).load()
    }

    async fn save(&self, entry: &JournalEntry) -> Result<()> {
        self.entry_file(&entry.id).save(entry)?;
        self.bump_revision();
        tracing::debug!("[TomlEntryRepository] Saved entry {}", entry.id);
        Ok(())
    }

    async fn delete(&self, entry_id: &str) -> Result<()> {
        self.entry_file(entry_id).remove()?;
        self.bump_revision();
        tracing::debug!("[TomlEntryRepository] Deleted entry {}", entry_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<JournalEntry>> {
        let entries_dir = self.base_dir.join("entries");
        let mut entries = Vec::new();

        for dir_entry in fs::read_dir(&entries_dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }

            match AtomicTomlFile::<JournalEntry>::new(&path).load() {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(err) => {
                    // A corrupt file should not take the whole journal down.
                    tracing::warn!(
                        "[TomlEntryRepository] Skipping unreadable entry file {}: {}",
                        path.display(),
                        err
                    );
                }
            }
        }

        entries.sort_by(Self::compare_by_date);
        Ok(entries)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
