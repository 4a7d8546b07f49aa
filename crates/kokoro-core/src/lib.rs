pub mod aggregate;
pub mod conversation;
pub mod entry;
pub mod error;
pub mod insight;
pub mod taxonomy;

// Re-export common error type
pub use error::KokoroError;
