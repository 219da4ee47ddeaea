use lugat_types::{Language, TranslationResult};
use serde_json::{Map, Value};

use crate::AttemptError;

/// Instruction sent to every candidate model. `{term}` is the only parameter.
const PROMPT_TEMPLATE: &str = r#"You are an expert language tutor. I will give you a word: "{term}".
1. Detect if it is English (en) or Turkish (tr).
2. Translate it to the other language.
3. Create a helpful, B1-level example sentence in the SOURCE language.
4. Return ONLY valid JSON with this structure:
{
  "translation": "Translated Word",
  "language": "en or tr",
  "targetLang": "tr or en",
  "example": "Example sentence here."
}"#;

pub fn build_prompt(term: &str) -> String {
    PROMPT_TEMPLATE.replace("{term}", term)
}

/// Drop markdown code fences the model may wrap its JSON in
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode a model's raw text into a card.
///
/// Text that isn't JSON is `Decode`; JSON that isn't a consistent
/// four-field card is `Malformed`.
pub fn decode_result(raw: &str) -> Result<TranslationResult, AttemptError> {
    let body = strip_code_fences(raw);
    if body.is_empty() {
        return Err(AttemptError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(&body)?;
    let object = value
        .as_object()
        .ok_or_else(|| AttemptError::Malformed(format!("expected a JSON object, got {value}")))?;

    let translation = string_field(object, "translation")?.trim();
    let example = string_field(object, "example")?.trim();
    let language = parse_language(string_field(object, "language")?)?;
    let target_lang = parse_language(string_field(object, "targetLang")?)?;

    if translation.is_empty() {
        return Err(AttemptError::Malformed("empty `translation`".to_string()));
    }

    if target_lang != language.opposite() {
        return Err(AttemptError::Malformed(format!(
            "`language` {language} and `targetLang` {target_lang} are not a translation pair"
        )));
    }

    Ok(TranslationResult {
        translation: translation.to_string(),
        language,
        target_lang,
        example: example.to_string(),
    })
}

fn string_field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a str, AttemptError> {
    object
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| AttemptError::Malformed(format!("missing string field `{name}`")))
}

fn parse_language(code: &str) -> Result<Language, AttemptError> {
    code.parse()
        .map_err(|e| AttemptError::Malformed(format!("{e}")))
}
