use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Term typed by the user, to be resolved
    Lookup(String),
    ShowPreview(CardPreview),
    LookupFailed(String),
    /// User confirmed a preview
    CreateCard(CardPreview),
    CardCreated(FlashcardRecord),
    ListCards,
    ShowCards(Vec<FlashcardRecord>),
    RemoveCard(Uuid),
    CardRemoved {
        id: Uuid,
        found: bool,
    },
    StatusUpdate(String),
    BackendReady,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Close,
}

/// Result of resolving a single term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    pub language: Language,
    #[serde(rename = "targetLang")]
    pub target_lang: Language,
    pub example: String,
}

/// A resolved term waiting for the user to save it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPreview {
    /// Term as the user typed it
    pub term: String,
    pub result: TranslationResult,
}

impl CardPreview {
    pub fn new(term: impl Into<String>, result: TranslationResult) -> Self {
        Self {
            term: term.into(),
            result,
        }
    }
}

/// A saved flashcard. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRecord {
    pub id: Uuid,
    pub term: String,
    pub translation: String,
    pub language: Language,
    pub example: String,
    pub created_at: DateTime<Utc>,
    /// Display date the card is grouped under
    pub group: String,
}

impl FlashcardRecord {
    pub fn from_preview(preview: CardPreview, created_at: DateTime<Utc>, group: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            term: preview.term.trim().to_string(),
            translation: preview.result.translation,
            language: preview.result.language,
            example: preview.result.example,
            created_at,
            group,
        }
    }

    pub fn target_lang(&self) -> Language {
        self.language.opposite()
    }
}
