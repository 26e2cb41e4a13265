use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use chrono::{DateTime, Utc};

/// Sentinel used when the service did not report a source language
pub const AUTO_LANGUAGE: &str = "auto";

// ============================================================================
// Records
// ============================================================================

/// A stored translation, used for both history and saved words.
///
/// The serialized field names are camelCase so that lists written by the
/// browser version of LexiGo load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TranslationRecord {
    pub id: String,
    pub source_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub detected_language: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
}

impl TranslationRecord {
    /// Build a record from a new entry, assigning id and timestamp.
    ///
    /// Returns `None` when either text is empty.
    pub fn from_entry(entry: NewEntry) -> Option<Self> {
        if entry.source_text.is_empty() || entry.translated_text.is_empty() {
            return None;
        }

        let detected_language = match entry.detected_language {
            Some(lang) if !lang.trim().is_empty() => lang,
            _ => AUTO_LANGUAGE.to_string(),
        };

        Some(Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_text: entry.source_text,
            translated_text: entry.translated_text,
            target_language: entry.target_language,
            detected_language,
            timestamp: Utc::now(),
        })
    }

    /// True when both records carry the same source/translation pair
    pub fn same_pair(&self, other: &Self) -> bool {
        self.source_text == other.source_text && self.translated_text == other.translated_text
    }
}

/// Record kept in a bounded, most-recent-first list
pub trait ListRecord: Clone + Serialize + DeserializeOwned + Send + Sync {
    type Entry;

    /// Build a full record, or `None` if the entry is not storable
    fn build(entry: Self::Entry) -> Option<Self>;
    fn id(&self) -> &str;
    /// Records with the same identity are duplicates of each other
    fn same_identity(&self, other: &Self) -> bool;
    fn target_language(&self) -> &str;
    /// Text matched by the search filter
    fn search_text(&self) -> String;
}

impl ListRecord for TranslationRecord {
    type Entry = NewEntry;

    fn build(entry: NewEntry) -> Option<Self> {
        Self::from_entry(entry)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn same_identity(&self, other: &Self) -> bool {
        self.same_pair(other)
    }

    fn target_language(&self) -> &str {
        &self.target_language
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.source_text, self.translated_text)
    }
}

/// Caller-supplied part of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewEntry {
    pub source_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub detected_language: Option<String>,
}

impl NewEntry {
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        target_language: impl Into<String>,
        detected_language: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            target_language: target_language.into(),
            detected_language: Some(detected_language.into()),
        }
    }
}

// ============================================================================
// Translation results
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TranslationOutcome {
    pub translated_text: String,
    /// Language code reported by the service, or `"auto"`
    pub detected_language: String,
}

// ============================================================================
// List filtering
// ============================================================================

/// Filter applied when listing history or saved words.
///
/// A language of `"all"` is the same as no language filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ListFilter {
    pub language: Option<String>,
    pub search: Option<String>,
}

impl ListFilter {
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn matches<R: ListRecord>(&self, record: &R) -> bool {
        let language_ok = match self.language.as_deref() {
            None | Some("") | Some("all") => true,
            Some(code) => record.target_language() == code,
        };
        if !language_ok {
            return false;
        }

        match self.search.as_deref().map(str::to_lowercase) {
            None => true,
            Some(query) if query.is_empty() => true,
            Some(query) => record.search_text().to_lowercase().contains(&query),
        }
    }
}

// ============================================================================
// Input length
// ============================================================================

/// Character counter level shown next to the input box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum InputLengthStatus {
    Normal,
    Warning,
    Danger,
}

impl InputLengthStatus {
    pub const WARNING_AT: usize = 4000;
    pub const DANGER_AT: usize = 4500;

    pub fn for_text(text: &str) -> Self {
        let count = text.chars().count();
        if count > Self::DANGER_AT {
            InputLengthStatus::Danger
        } else if count > Self::WARNING_AT {
            InputLengthStatus::Warning
        } else {
            InputLengthStatus::Normal
        }
    }
}
