use thiserror::Error;

/// Speaking rate used for translations, slightly slower than normal
pub const SPEECH_RATE: f32 = 0.9;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Speech is not supported on this device.")]
    Unsupported,

    #[error("No speech detected. Please try again.")]
    NoSpeech,

    #[error("No microphone found. Please check your microphone.")]
    MicrophoneUnavailable,

    #[error("Microphone permission denied. Please allow microphone access.")]
    PermissionDenied,

    #[error("No translation to read!")]
    NothingToSpeak,

    #[error("Speech failed: {0}")]
    Other(String),
}

/// Speech-to-text engine. Transcripts are delivered to the workflow by the
/// front end through `TranslatorWorkflow::on_transcript`.
pub trait SpeechInput: Send + Sync {
    fn start(&self, language: &str) -> Result<(), SpeechError>;
    fn stop(&self);
    fn is_listening(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Utterance for a translated text, picking the best voice for `lang`
    pub fn for_translation(text: &str, lang: &str, voices: &[Voice]) -> Self {
        let lang = if lang.is_empty() { "en" } else { lang };
        Self {
            text: text.to_string(),
            lang: lang.to_string(),
            voice: select_voice(voices, lang).map(|v| v.name.clone()),
            rate: SPEECH_RATE,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Text-to-speech engine
pub trait SpeechOutput: Send + Sync {
    fn voices(&self) -> Vec<Voice>;
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
    fn cancel(&self);
    fn is_speaking(&self) -> bool;
}

/// Pick a voice for `lang`.
///
/// Prefers a voice whose language starts with the full code, then one that
/// starts with the primary subtag, then one that merely contains it.
pub fn select_voice<'a>(voices: &'a [Voice], lang: &str) -> Option<&'a Voice> {
    let primary = lang.split('-').next().unwrap_or(lang);
    voices
        .iter()
        .find(|v| v.lang.starts_with(lang) || v.lang.starts_with(primary))
        .or_else(|| voices.iter().find(|v| v.lang.contains(primary)))
}

/// Append a transcript to the current input, separated by one space
pub fn append_transcript(current: &str, transcript: &str) -> String {
    let current = current.trim();
    let transcript = transcript.trim();
    match (current.is_empty(), transcript.is_empty()) {
        (true, _) => transcript.to_string(),
        (false, true) => current.to_string(),
        (false, false) => format!("{} {}", current, transcript),
    }
}
