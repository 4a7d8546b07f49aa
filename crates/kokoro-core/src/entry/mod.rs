//! Journal entry domain module.
//!
//! # Module Structure
//!
//! - `model`: Core entry domain model (`JournalEntry`)
//! - `repository`: Repository trait for entry persistence (`EntryRepository`)

mod model;
mod repository;

// Re-export public API
pub use model::{DEFAULT_CATEGORY, DEFAULT_TITLE, JournalEntry};
pub use repository::EntryRepository;
