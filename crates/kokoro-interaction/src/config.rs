//! Configuration for the insight service connection.
//!
//! Supports reading overrides from `~/.config/kokoro/service.json`.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default base URL of the companion insight service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "KOKORO_INSIGHT_URL";

/// Connection settings for the insight service.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for InsightServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl InsightServiceConfig {
    /// Resolves the effective configuration.
    ///
    /// Priority:
    /// 1. `KOKORO_INSIGHT_URL` environment variable (base URL only)
    /// 2. `~/.config/kokoro/service.json`
    /// 3. Built-in defaults (local companion service)
    pub fn resolve() -> Self {
        let mut config = load_service_config().unwrap_or_default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                config.base_url = trimmed.to_string();
            }
        }
        config
    }
}

/// Loads the service configuration file from ~/.config/kokoro/service.json
fn load_service_config() -> Option<InsightServiceConfig> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        return None;
    }

    let content = fs::read_to_string(&config_path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Returns the path to the configuration file: ~/.config/kokoro/service.json
fn get_config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("kokoro").join("service.json"))
}
