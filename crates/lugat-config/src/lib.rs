use std::env;

use serde::{Deserialize, Serialize};

use self::quiz::QuizConfig;
use self::resolver::ResolverConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod quiz;
pub mod resolver;
pub mod storage;
pub mod ui;

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub storage: StorageConfig,
    pub quiz: QuizConfig,
    pub ui: UiConfig,

    /// tracing EnvFilter directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Capacity of the ui <-> app channels
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            storage: StorageConfig::default(),
            quiz: QuizConfig::default(),
            ui: UiConfig::default(),
            log_filter: default_log_filter(),
            channel_capacity: 64,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(lookup);
        config
    }

    /// Overwrite only the settings whose variable is set
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(filter) = lookup("LUGAT_LOG") {
            self.log_filter = filter;
        }

        if let Some(capacity) = lookup("LUGAT_CHANNEL_CAPACITY")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&c| c > 0)
        {
            self.channel_capacity = capacity;
        }

        self.resolver.apply_overrides(&lookup);
        self.storage.apply_overrides(&lookup);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.resolver.candidate_models[0], "gemini-2.0-flash");
        assert_eq!(config.resolver.candidate_models.len(), 5);
        assert_eq!(config.resolver.mock_delay_ms, 1500);
        assert_eq!(config.resolver.timeout_seconds, None);
        assert_eq!(config.quiz.min_cards, 3);
        assert_eq!(config.quiz.max_questions, 5);
        assert_eq!(config.storage.date_format, "%Y-%m-%d");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("LUGAT_MODELS", " m1, ,m2 "),
            ("LUGAT_MOCK_DELAY_MS", "0"),
            ("LUGAT_TIMEOUT_SECONDS", "12"),
            ("LUGAT_DATA_DIR", "/tmp/lugat"),
            ("LUGAT_CHANNEL_CAPACITY", "0"),
        ]));
        assert_eq!(config.resolver.candidate_models, vec!["m1", "m2"]);
        assert_eq!(config.resolver.mock_delay_ms, 0);
        assert_eq!(config.resolver.timeout_seconds, Some(12));
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/lugat")));
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_blank_model_list_keeps_defaults() {
        let config = Config::from_lookup(lookup_from(&[("LUGAT_MODELS", " , ")]));
        assert_eq!(config.resolver.candidate_models.len(), 5);
    }

    #[test]
    fn test_overrides_keep_profile_values() {
        let mut config: Config = serde_json::from_str(
            r#"{ "resolver": { "candidate_models": ["gemini-pro"], "mock_delay_ms": 10 },
                 "storage": { "date_format": "%d.%m.%Y" },
                 "log_filter": "debug" }"#,
        )
        .unwrap();

        config.apply_overrides(lookup_from(&[
            ("LUGAT_MODELS", "m1,m2"),
            ("LUGAT_DATA_DIR", "/srv/lugat"),
        ]));

        assert_eq!(config.resolver.candidate_models, vec!["m1", "m2"]);
        assert_eq!(config.resolver.mock_delay_ms, 10);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/srv/lugat")));
        assert_eq!(config.storage.date_format, "%d.%m.%Y");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_no_overrides_is_a_no_op() {
        let mut config = Config::default();
        config.resolver.timeout_seconds = Some(5);
        config.apply_overrides(|_| None);
        assert_eq!(config.resolver.timeout_seconds, Some(5));
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "quiz": { "max_questions": 10 }, "ui": {} }"#).unwrap();
        assert_eq!(config.quiz.max_questions, 10);
        assert_eq!(config.quiz.min_cards, 3);
        assert_eq!(config.ui.prompt, "lugat> ");
        assert_eq!(config.resolver.api_base, "https://generativelanguage.googleapis.com/v1beta");
    }
}
