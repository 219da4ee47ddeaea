use std::fmt::Write;

use lugat_types::{CardPreview, FlashcardRecord};

pub fn preview(preview: &CardPreview) -> String {
    let result = &preview.result;
    format!(
        "{} ({} -> {})\n  {}\n  e.g. {}",
        preview.term.trim(),
        result.language,
        result.target_lang,
        result.translation,
        result.example
    )
}

/// Cards grouped under their display date, newest group first
pub fn cards(records: &[FlashcardRecord], show_examples: bool) -> String {
    if records.is_empty() {
        return "No words yet. Type a word to get started!".to_string();
    }

    let mut out = String::new();
    let mut current_group: Option<&str> = None;

    for record in records {
        if current_group != Some(record.group.as_str()) {
            if current_group.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", record.group);
            current_group = Some(record.group.as_str());
        }

        let _ = writeln!(
            out,
            "  {} -> {}  [{}->{}]  {}",
            record.term,
            record.translation,
            record.language,
            record.target_lang(),
            record.id
        );
        if show_examples && !record.example.is_empty() {
            let _ = writeln!(out, "      {}", record.example);
        }
    }

    let _ = write!(out, "{} cards", records.len());
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lugat_types::{Language, TranslationResult};
    use uuid::Uuid;

    use super::*;

    fn record(term: &str, group: &str) -> FlashcardRecord {
        FlashcardRecord {
            id: Uuid::new_v4(),
            term: term.into(),
            translation: format!("{term}-tr"),
            language: Language::En,
            example: format!("Example for {term}."),
            created_at: Utc::now(),
            group: group.into(),
        }
    }

    #[test]
    fn test_preview_shows_pair() {
        let text = preview(&CardPreview::new(
            "elma",
            TranslationResult {
                translation: "Apple".into(),
                language: Language::Tr,
                target_lang: Language::En,
                example: "Elma yerim.".into(),
            },
        ));
        assert!(text.starts_with("elma (tr -> en)"));
        assert!(text.contains("Apple"));
        assert!(text.contains("e.g. Elma yerim."));
    }

    #[test]
    fn test_empty_collection() {
        assert!(cards(&[], true).starts_with("No words yet"));
    }

    #[test]
    fn test_groups_are_printed_once() {
        let records = vec![
            record("apple", "2026-10-16"),
            record("hello", "2026-10-16"),
            record("computer", "2026-10-15"),
        ];
        let text = cards(&records, false);

        assert_eq!(text.matches("2026-10-16").count(), 1);
        assert_eq!(text.matches("2026-10-15").count(), 1);
        assert!(!text.contains("Example for"));
        assert!(text.ends_with("3 cards"));
    }

    #[test]
    fn test_examples_toggle() {
        let text = cards(&[record("apple", "g")], true);
        assert!(text.contains("      Example for apple."));
    }
}
