use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Where slot files live. Platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// chrono format used for a card's display group
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            date_format: default_date_format(),
        }
    }
}

impl StorageConfig {
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("LUGAT_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = lookup("LUGAT_DATE_FORMAT") {
            self.date_format = format;
        }
    }
}
