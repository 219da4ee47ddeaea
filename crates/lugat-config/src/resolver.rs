use serde::{Deserialize, Serialize};

pub const DEFAULT_CANDIDATE_MODELS: [&str; 5] = [
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash",
    "gemini-1.5-flash",
    "gemini-pro",
];

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_candidate_models() -> Vec<String> {
    DEFAULT_CANDIDATE_MODELS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_mock_delay_ms() -> u64 {
    1500
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ResolverConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Models tried in order, first one that answers wins
    #[serde(default = "default_candidate_models")]
    pub candidate_models: Vec<String>,
    /// Simulated latency of the offline resolver
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
    /// Per-request timeout, transport default when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            candidate_models: default_candidate_models(),
            mock_delay_ms: default_mock_delay_ms(),
            timeout_seconds: None,
        }
    }
}

impl ResolverConfig {
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = lookup("LUGAT_API_BASE") {
            self.api_base = api_base;
        }

        if let Some(models) = lookup("LUGAT_MODELS")
            .map(|v| parse_model_list(&v))
            .filter(|models| !models.is_empty())
        {
            self.candidate_models = models;
        }

        if let Some(delay) = lookup("LUGAT_MOCK_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.mock_delay_ms = delay;
        }

        if let Some(timeout) = lookup("LUGAT_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.timeout_seconds = Some(timeout);
        }
    }
}

/// Comma separated model ids, blanks dropped
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
