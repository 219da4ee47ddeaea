use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default term preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let text: String = text.nfkc().collect();

        // Collapse runs of whitespace, newlines included
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Case-insensitive lookup key for a term
pub fn normalize_term(term: &str) -> String {
    DefaultPreprocessor.process(term).to_lowercase()
}
