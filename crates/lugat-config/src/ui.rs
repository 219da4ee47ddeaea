use serde::{Deserialize, Serialize};

fn default_prompt() -> String {
    "lugat> ".to_string()
}

fn default_show_examples() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Print example sentences in card listings
    #[serde(default = "default_show_examples")]
    pub show_examples: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_examples: default_show_examples(),
        }
    }
}
