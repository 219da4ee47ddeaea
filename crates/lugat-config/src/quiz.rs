use serde::{Deserialize, Serialize};

fn default_min_cards() -> usize {
    3
}

fn default_max_questions() -> usize {
    5
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuizConfig {
    /// Cards needed before a quiz can start
    #[serde(default = "default_min_cards")]
    pub min_cards: usize,
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            min_cards: default_min_cards(),
            max_questions: default_max_questions(),
        }
    }
}
