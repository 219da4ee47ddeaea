use std::time::Duration;

use async_trait::async_trait;
use lugat_core::preprocess::normalize_term;
use lugat_types::{Language, TranslationResult};

use crate::{ProviderMetadata, ResolutionError, Resolver};

const SIMULATED_PREFIX: &str = "[Simulated]";

struct KnownTerm {
    term: &'static str,
    translation: &'static str,
    language: Language,
    example: &'static str,
}

const KNOWN_TERMS: &[KnownTerm] = &[
    KnownTerm {
        term: "apple",
        translation: "Elma",
        language: Language::En,
        example: "I eat an apple every day for breakfast.",
    },
    KnownTerm {
        term: "elma",
        translation: "Apple",
        language: Language::Tr,
        example: "Her gün kahvaltıda bir elma yerim.",
    },
    KnownTerm {
        term: "computer",
        translation: "Bilgisayar",
        language: Language::En,
        example: "My computer is very fast.",
    },
    KnownTerm {
        term: "bilgisayar",
        translation: "Computer",
        language: Language::Tr,
        example: "Bilgisayarım çok hızlı.",
    },
    KnownTerm {
        term: "hello",
        translation: "Merhaba",
        language: Language::En,
        example: "Hello, how are you today?",
    },
    KnownTerm {
        term: "merhaba",
        translation: "Hello",
        language: Language::Tr,
        example: "Merhaba, bugün nasılsın?",
    },
    KnownTerm {
        term: "gradable",
        translation: "Derecelendirilebilir",
        language: Language::En,
        example: "Adjectives like 'good' and 'bad' are gradable adjectives.",
    },
];

/// Offline resolver used when no API key is configured.
///
/// Known terms come from a fixed table, anything else gets a placeholder
/// card tagged `[Simulated]`.
#[derive(Debug, Clone)]
pub struct MockResolver {
    delay: Duration,
}

impl MockResolver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Resolve after the simulated latency. Never fails.
    pub async fn lookup(&self, term: &str) -> TranslationResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        lookup_now(term)
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

/// Table lookup, then the synthesized fallback
pub fn lookup_now(term: &str) -> TranslationResult {
    let key = normalize_term(term);

    if let Some(known) = KNOWN_TERMS.iter().find(|k| k.term == key) {
        return TranslationResult {
            translation: known.translation.to_string(),
            language: known.language,
            target_lang: known.language.opposite(),
            example: known.example.to_string(),
        };
    }

    let term = term.trim();
    let language = classify(term);
    let example = match language {
        Language::En => format!("(Auto-generated example for \"{term}\")"),
        Language::Tr => format!("(\"{term}\" için otomatik üretilen örnek)"),
    };

    TranslationResult {
        translation: format!("{SIMULATED_PREFIX} {term}"),
        language,
        target_lang: language.opposite(),
        example,
    }
}

/// English when the term is plain ASCII letters and spaces, Turkish otherwise
fn classify(term: &str) -> Language {
    let ascii_words = !term.is_empty()
        && term
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace());

    if ascii_words { Language::En } else { Language::Tr }
}

pub fn is_simulated(result: &TranslationResult) -> bool {
    result.translation.starts_with(SIMULATED_PREFIX)
}

#[async_trait]
impl Resolver for MockResolver {
    async fn resolve(&self, term: &str) -> Result<TranslationResult, ResolutionError> {
        Ok(self.lookup(term).await)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".to_string(),
            simulated: true,
        }
    }
}
