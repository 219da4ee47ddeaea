pub mod language;
pub mod types;

pub use language::{Language, ParseLanguageError};
pub use types::{AppEvent, CardPreview, FlashcardRecord, TranslationResult, UiEvent};
