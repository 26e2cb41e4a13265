use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::{TranslationError, TranslatorResult};
use crate::shared::types::{TranslationOutcome, AUTO_LANGUAGE};

/// A validated translate call. Source language is always auto-detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target: String,
}

impl TranslationRequest {
    /// Trim the text and check both fields are present
    pub fn new(text: &str, target: &str) -> TranslatorResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslationError::Validation("text is empty".to_string()));
        }
        let target = target.trim();
        if target.is_empty() {
            return Err(TranslationError::Validation("target language is missing".to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            target: target.to_string(),
        })
    }
}

/// Parse the endpoint's nested array: `[[["seg", "src", ...], ...], null, "en", ...]`
pub fn parse_response(json: &Value) -> TranslatorResult<TranslationOutcome> {
    let sentences = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslationError::ServiceUnavailable("Invalid response format".to_string()))?;

    let mut translated = String::new();
    for sentence in sentences {
        if let Some(segment) = sentence.get(0).and_then(|v| v.as_str()) {
            translated.push_str(segment);
        }
    }

    if translated.is_empty() {
        return Err(TranslationError::ServiceUnavailable("Response contained no translation".to_string()));
    }

    Ok(TranslationOutcome {
        translated_text: translated,
        detected_language: detected_language(json).unwrap_or_else(|| AUTO_LANGUAGE.to_string()),
    })
}

/// The detected source language in element 2, if the service reported one
pub fn detected_language(json: &Value) -> Option<String> {
    json.get(2)
        .and_then(|v| v.as_str())
        .filter(|code| !code.is_empty())
        .map(|code| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_trims_and_validates() {
        let req = TranslationRequest::new("  hello  ", "es").unwrap();
        assert_eq!(req.text, "hello");

        assert!(matches!(TranslationRequest::new("   ", "es"), Err(TranslationError::Validation(_))));
        assert!(matches!(TranslationRequest::new("hello", ""), Err(TranslationError::Validation(_))));
    }

    #[test]
    fn concatenates_segments_and_reads_detected_language() {
        let body = json!([
            [["Hola. ", "Hello. ", null, null, 10], ["¿Cómo estás?", "How are you?", null, null, 10]],
            null,
            "en"
        ]);
        let outcome = parse_response(&body).unwrap();
        assert_eq!(outcome.translated_text, "Hola. ¿Cómo estás?");
        assert_eq!(outcome.detected_language, "en");
    }

    #[test]
    fn missing_detected_language_falls_back_to_auto() {
        let body = json!([[["Hola", "Hello"]]]);
        assert_eq!(parse_response(&body).unwrap().detected_language, "auto");

        let body = json!([[["Hola", "Hello"]], null, null]);
        assert_eq!(parse_response(&body).unwrap().detected_language, "auto");
    }

    #[test]
    fn unexpected_shapes_are_service_unavailable() {
        for body in [json!({"error": "nope"}), json!([]), json!([null]), json!([[]]), json!("text")] {
            assert!(
                matches!(parse_response(&body), Err(TranslationError::ServiceUnavailable(_))),
                "body {} should be rejected",
                body
            );
        }
    }
}
