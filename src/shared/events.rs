use serde::{Serialize, Deserialize};
use ts_rs::TS;
use super::types::{InputLengthStatus, TranslationOutcome, TranslationRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
#[ts(export, export_to = "bindings/")]
pub enum AppEvent {
    #[serde(rename = "input://changed")]
    InputChanged {
        text: String,
        length: InputLengthStatus,
    },

    #[serde(rename = "output://cleared")]
    OutputCleared,

    #[serde(rename = "translation://ready")]
    TranslationReady {
        source_text: String,
        target_language: String,
        outcome: TranslationOutcome,
    },

    #[serde(rename = "translation://failed")]
    TranslationFailed(String),

    #[serde(rename = "history://changed")]
    HistoryChanged(Vec<TranslationRecord>),

    #[serde(rename = "vocabulary://changed")]
    VocabularyChanged(Vec<TranslationRecord>),

    #[serde(rename = "speech://listening")]
    ListeningChanged(bool),

    #[serde(rename = "speech://speaking")]
    SpeakingChanged(bool),

    #[serde(rename = "notice://show")]
    Notice {
        level: NoticeLevel,
        message: String,
    },
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::InputChanged { .. } => "input://changed",
            AppEvent::OutputCleared => "output://cleared",
            AppEvent::TranslationReady { .. } => "translation://ready",
            AppEvent::TranslationFailed(_) => "translation://failed",
            AppEvent::HistoryChanged(_) => "history://changed",
            AppEvent::VocabularyChanged(_) => "vocabulary://changed",
            AppEvent::ListeningChanged(_) => "speech://listening",
            AppEvent::SpeakingChanged(_) => "speech://speaking",
            AppEvent::Notice { .. } => "notice://show",
        }
    }

    pub fn notice(level: NoticeLevel, message: impl Into<String>) -> Self {
        AppEvent::Notice {
            level,
            message: message.into(),
        }
    }
}
