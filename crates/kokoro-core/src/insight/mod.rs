//! Insight domain module.
//!
//! # Module Structure
//!
//! - `analysis`: Per-entry analysis result (`EntryAnalysis`)
//! - `model`: Narrative insight models (`BalanceInsight`, `ChatSeed`)
//! - `service`: External reasoning service trait (`InsightService`)

mod analysis;
mod model;
mod service;

// Re-export public API
pub use analysis::EntryAnalysis;
pub use model::{BalanceInsight, ChatSeed};
pub use service::InsightService;
