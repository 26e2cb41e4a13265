//! Debounced translate-and-persist workflow
//!
//! Input events update the current text/target and schedule a translation on
//! the debouncer. When it fires, the translation result goes to the view and
//! into the history list. Responses are applied in arrival order: a slow,
//! stale response can overwrite a newer one on the output.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::core::collab::clipboard::{copy_text, ClipboardError, ClipboardSink};
use crate::core::collab::ocr::{read_image_text, ImageInput, ImageTextExtractor, OcrError};
use crate::core::collab::speech::{append_transcript, SpeechError, SpeechInput, SpeechOutput, Utterance};
use crate::core::debounce::Debouncer;
use crate::core::features::translator::{language_name, TranslationProvider};
use crate::core::lists::{BoundedList, HistoryStore, VocabularyStore};
use crate::shared::emit::{emit_event, ViewBinder};
use crate::shared::error::{TranslationError, TranslatorResult};
use crate::shared::events::{AppEvent, NoticeLevel};
use crate::shared::types::{InputLengthStatus, NewEntry, TranslationOutcome, TranslationRecord};

pub const TRANSLATION_FAILED_MESSAGE: &str =
    "Translation failed. Please check your internet connection and try again.";

/// Services the workflow depends on, built once at startup
#[derive(Clone)]
pub struct Services {
    pub translator: Arc<dyn TranslationProvider>,
    pub history: Arc<HistoryStore>,
    pub vocabulary: Arc<VocabularyStore>,
    pub view: Arc<dyn ViewBinder>,
    pub speech_input: Option<Arc<dyn SpeechInput>>,
    pub speech_output: Option<Arc<dyn SpeechOutput>>,
    pub ocr: Option<Arc<dyn ImageTextExtractor>>,
    pub clipboard: Option<Arc<dyn ClipboardSink>>,
}

impl Services {
    pub fn new(
        translator: Arc<dyn TranslationProvider>,
        history: Arc<HistoryStore>,
        vocabulary: Arc<VocabularyStore>,
        view: Arc<dyn ViewBinder>,
    ) -> Self {
        Self {
            translator,
            history,
            vocabulary,
            view,
            speech_input: None,
            speech_output: None,
            ocr: None,
            clipboard: None,
        }
    }

    pub fn with_speech(mut self, input: Arc<dyn SpeechInput>, output: Arc<dyn SpeechOutput>) -> Self {
        self.speech_input = Some(input);
        self.speech_output = Some(output);
        self
    }

    pub fn with_ocr(mut self, ocr: Arc<dyn ImageTextExtractor>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }
}

/// Last successful translation shown on the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentTranslation {
    pub source_text: String,
    pub target_language: String,
    pub outcome: TranslationOutcome,
}

#[derive(Default)]
struct State {
    input: String,
    target: String,
    output: Option<CurrentTranslation>,
}

struct Inner {
    services: Services,
    state: Mutex<State>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, event: AppEvent) {
        emit_event(self.services.view.as_ref(), event);
    }

    fn notice(&self, level: NoticeLevel, message: impl Into<String>) {
        self.emit(AppEvent::notice(level, message));
    }

    async fn translate_now(&self) -> TranslatorResult<TranslationOutcome> {
        let (text, target) = {
            let state = self.state();
            (state.input.trim().to_string(), state.target.trim().to_string())
        };
        if text.is_empty() || target.is_empty() {
            return Err(TranslationError::Validation("nothing to translate".to_string()));
        }

        self.emit(AppEvent::OutputCleared);

        match self.services.translator.translate(&text, &target).await {
            Ok(outcome) => {
                info!(
                    target_lang = %target,
                    detected = %outcome.detected_language,
                    "translation ready"
                );
                self.state().output = Some(CurrentTranslation {
                    source_text: text.clone(),
                    target_language: target.clone(),
                    outcome: outcome.clone(),
                });
                self.emit(AppEvent::TranslationReady {
                    source_text: text.clone(),
                    target_language: target.clone(),
                    outcome: outcome.clone(),
                });

                let history = &self.services.history;
                history.add(NewEntry {
                    source_text: text,
                    translated_text: outcome.translated_text.clone(),
                    target_language: target,
                    detected_language: Some(outcome.detected_language.clone()),
                });
                self.emit(AppEvent::HistoryChanged(history.preview()));
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, "translation failed");
                self.state().output = None;
                self.emit(AppEvent::TranslationFailed(TRANSLATION_FAILED_MESSAGE.to_string()));
                Err(e)
            }
        }
    }
}

pub struct TranslatorWorkflow {
    inner: Arc<Inner>,
    debouncer: Debouncer,
}

impl TranslatorWorkflow {
    pub fn new(services: Services, quiet_period: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                services,
                state: Mutex::new(State::default()),
            }),
            debouncer: Debouncer::new(quiet_period),
        }
    }

    pub fn services(&self) -> &Services {
        &self.inner.services
    }

    pub fn input(&self) -> String {
        self.inner.state().input.clone()
    }

    pub fn target(&self) -> String {
        self.inner.state().target.clone()
    }

    pub fn current(&self) -> Option<CurrentTranslation> {
        self.inner.state().output.clone()
    }

    pub fn input_length_status(&self) -> InputLengthStatus {
        InputLengthStatus::for_text(&self.inner.state().input)
    }

    pub fn is_translation_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Wait for debounced translations that have already started
    pub async fn wait_for_translations(&self) {
        self.debouncer.wait_fired().await;
    }

    fn set_input(&self, text: String) {
        let length = InputLengthStatus::for_text(&text);
        self.inner.state().input = text.clone();
        self.inner.emit(AppEvent::InputChanged { text, length });
    }

    /// Input text edited
    pub fn on_input(&self, text: &str) -> bool {
        self.set_input(text.to_string());
        self.auto_translate()
    }

    /// Target language chosen
    pub fn on_target_language(&self, code: &str) -> bool {
        self.inner.state().target = code.trim().to_string();
        self.auto_translate()
    }

    /// Schedule a translation if there is input and a target.
    ///
    /// Returns whether one was scheduled. With nothing to translate, any
    /// already pending translation is left in place.
    pub fn auto_translate(&self) -> bool {
        {
            let state = self.inner.state();
            if state.input.trim().is_empty() || state.target.is_empty() {
                return false;
            }
        }

        let inner = Arc::clone(&self.inner);
        self.debouncer.schedule(move || async move {
            let _ = inner.translate_now().await;
        });
        true
    }

    /// Translate immediately, skipping the debouncer
    pub async fn translate_now(&self) -> TranslatorResult<TranslationOutcome> {
        self.debouncer.cancel();
        self.inner.translate_now().await
    }

    /// Detect the language of the current input
    pub async fn detect_language(&self) -> TranslatorResult<Option<String>> {
        let text = self.input();
        if text.trim().is_empty() {
            self.inner.notice(NoticeLevel::Error, "Please enter text to detect language!");
            return Err(TranslationError::Validation("text is empty".to_string()));
        }

        match self.inner.services.translator.detect_language(&text).await {
            Ok(Some(code)) => {
                self.inner.notice(
                    NoticeLevel::Success,
                    format!("Language detected: {}", language_name(&code)),
                );
                Ok(Some(code))
            }
            Ok(None) => {
                self.inner.notice(NoticeLevel::Error, "Could not detect language");
                Ok(None)
            }
            Err(e) => {
                error!(error = %e, "language detection failed");
                self.inner.notice(NoticeLevel::Error, "Language detection failed");
                Err(e)
            }
        }
    }

    /// Save the translation on screen to the notebook
    pub fn save_current(&self) -> Option<TranslationRecord> {
        let Some(current) = self.current() else {
            self.inner.notice(NoticeLevel::Error, "Nothing to save!");
            return None;
        };

        let vocabulary = &self.inner.services.vocabulary;
        let Some(record) = vocabulary.add(NewEntry {
            source_text: current.source_text,
            translated_text: current.outcome.translated_text,
            target_language: current.target_language,
            detected_language: Some(current.outcome.detected_language),
        }) else {
            self.inner.notice(NoticeLevel::Error, "Failed to save word.");
            return None;
        };
        self.inner.emit(AppEvent::VocabularyChanged(vocabulary.all()));
        self.inner.notice(NoticeLevel::Success, "Word saved to notebook.");
        Some(record)
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    fn copy(&self, text: &str, success: &str) -> Result<(), ClipboardError> {
        let result = match &self.inner.services.clipboard {
            Some(clipboard) => copy_text(clipboard.as_ref(), text),
            None => Err(ClipboardError::Unavailable("no clipboard configured".to_string())),
        };
        match &result {
            Ok(()) => self.inner.notice(NoticeLevel::Success, success),
            Err(e) => self.inner.notice(NoticeLevel::Error, e.to_string()),
        }
        result
    }

    /// Copy the translation on screen. A failed or missing translation is
    /// never copied.
    pub fn copy_translation(&self) -> Result<(), ClipboardError> {
        let text = self
            .current()
            .map(|current| current.outcome.translated_text)
            .unwrap_or_default();
        self.copy(&text, "Translation copied to clipboard!")
    }

    fn copy_record(
        &self,
        list: &BoundedList<TranslationRecord>,
        id: &str,
        source: bool,
    ) -> Result<(), ClipboardError> {
        let record = list.get(id);
        let (text, success) = match (&record, source) {
            (Some(record), true) => (record.source_text.as_str(), "Source text copied."),
            (Some(record), false) => (record.translated_text.as_str(), "Translated text copied."),
            (None, _) => ("", ""),
        };
        self.copy(text, success)
    }

    pub fn copy_history_entry(&self, id: &str, source: bool) -> Result<(), ClipboardError> {
        self.copy_record(&self.inner.services.history, id, source)
    }

    pub fn copy_saved_word(&self, id: &str, source: bool) -> Result<(), ClipboardError> {
        self.copy_record(&self.inner.services.vocabulary, id, source)
    }

    fn stop_speech(&self) {
        if let Some(input) = &self.inner.services.speech_input {
            if input.is_listening() {
                input.stop();
                self.inner.emit(AppEvent::ListeningChanged(false));
            }
        }
        if let Some(output) = &self.inner.services.speech_output {
            if output.is_speaking() {
                output.cancel();
                self.inner.emit(AppEvent::SpeakingChanged(false));
            }
        }
    }

    pub fn clear_input(&self) {
        self.debouncer.cancel();
        self.stop_speech();
        self.inner.state().output = None;
        self.set_input(String::new());
        self.inner.emit(AppEvent::OutputCleared);
        self.inner.notice(NoticeLevel::Success, "Input cleared!");
    }

    pub fn clear_output(&self) {
        self.debouncer.cancel();
        self.inner.state().output = None;
        if let Some(output) = &self.inner.services.speech_output {
            if output.is_speaking() {
                output.cancel();
                self.inner.emit(AppEvent::SpeakingChanged(false));
            }
        }
        self.inner.emit(AppEvent::OutputCleared);
        self.inner.notice(NoticeLevel::Success, "Translation cleared!");
    }

    // ------------------------------------------------------------------
    // Speech
    // ------------------------------------------------------------------

    pub fn toggle_voice_input(&self, language: &str) -> Result<bool, SpeechError> {
        let Some(input) = &self.inner.services.speech_input else {
            self.inner.notice(NoticeLevel::Error, SpeechError::Unsupported.to_string());
            return Err(SpeechError::Unsupported);
        };

        if input.is_listening() {
            input.stop();
            self.inner.emit(AppEvent::ListeningChanged(false));
            self.inner.notice(NoticeLevel::Info, "Voice input stopped.");
            return Ok(false);
        }

        if let Err(e) = input.start(language) {
            self.inner.notice(NoticeLevel::Error, e.to_string());
            return Err(e);
        }
        self.inner.emit(AppEvent::ListeningChanged(true));
        self.inner.notice(NoticeLevel::Info, "Listening... Speak now!");
        Ok(true)
    }

    /// A finished transcript from the speech input
    pub fn on_transcript(&self, transcript: &str) -> bool {
        let text = append_transcript(&self.input(), transcript);
        self.set_input(text);
        self.inner.emit(AppEvent::ListeningChanged(false));
        self.inner.notice(NoticeLevel::Success, "Voice input received!");
        self.auto_translate()
    }

    pub fn toggle_voice_output(&self) -> Result<bool, SpeechError> {
        let Some(output) = &self.inner.services.speech_output else {
            self.inner.notice(NoticeLevel::Error, SpeechError::Unsupported.to_string());
            return Err(SpeechError::Unsupported);
        };
        let Some(current) = self.current() else {
            self.inner.notice(NoticeLevel::Error, SpeechError::NothingToSpeak.to_string());
            return Err(SpeechError::NothingToSpeak);
        };

        if output.is_speaking() {
            output.cancel();
            self.inner.emit(AppEvent::SpeakingChanged(false));
            self.inner.notice(NoticeLevel::Info, "Stopped reading.");
            return Ok(false);
        }

        output.cancel();
        let utterance = Utterance::for_translation(
            &current.outcome.translated_text,
            &current.target_language,
            &output.voices(),
        );
        debug!(lang = %utterance.lang, voice = ?utterance.voice, "speaking translation");
        if let Err(e) = output.speak(utterance) {
            self.inner.notice(NoticeLevel::Error, "Failed to read translation.");
            return Err(e);
        }
        self.inner.emit(AppEvent::SpeakingChanged(true));
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Image text
    // ------------------------------------------------------------------

    /// Replace the input with text read from an image
    pub async fn load_image(&self, image: &ImageInput) -> Result<String, OcrError> {
        let result = match &self.inner.services.ocr {
            Some(ocr) => read_image_text(ocr.as_ref(), image).await,
            None => Err(OcrError::EngineUnavailable("no OCR engine configured".to_string())),
        };

        match result {
            Ok(text) => {
                self.set_input(text.clone());
                self.auto_translate();
                self.inner.notice(NoticeLevel::Success, "Text extracted from image!");
                Ok(text)
            }
            Err(e) => {
                self.inner.notice(NoticeLevel::Error, e.to_string());
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // List management
    // ------------------------------------------------------------------

    pub fn remove_history_entry(&self, id: &str) -> bool {
        let history = &self.inner.services.history;
        let removed = history.remove(id);
        if removed {
            self.inner.emit(AppEvent::HistoryChanged(history.preview()));
            self.inner.notice(NoticeLevel::Success, "Entry removed from history.");
        }
        removed
    }

    pub fn clear_history(&self) {
        self.inner.services.history.clear();
        self.inner.emit(AppEvent::HistoryChanged(Vec::new()));
        self.inner.notice(NoticeLevel::Success, "Translation history cleared.");
    }

    pub fn remove_saved_word(&self, id: &str) -> bool {
        let vocabulary = &self.inner.services.vocabulary;
        let removed = vocabulary.remove(id);
        if removed {
            self.inner.emit(AppEvent::VocabularyChanged(vocabulary.all()));
            self.inner.notice(NoticeLevel::Success, "Word removed from notebook.");
        }
        removed
    }

    pub fn clear_vocabulary(&self) {
        self.inner.services.vocabulary.clear();
        self.inner.emit(AppEvent::VocabularyChanged(Vec::new()));
        self.inner.notice(NoticeLevel::Success, "Notebook cleared.");
    }
}
