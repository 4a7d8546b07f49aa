//! Interaction layer for Kokoro.
//!
//! This crate owns the connection to the external insight/reasoning service:
//! the reqwest-based [`InsightApiClient`] implementing the domain
//! [`InsightService`](kokoro_core::insight::InsightService) trait, and its
//! configuration.

pub mod config;
pub mod insight_api_client;

pub use config::InsightServiceConfig;
pub use insight_api_client::InsightApiClient;
