//! Collaborators that feed text into the translator or read results out
//!
//! The OCR and speech engines are provided by the front end; this module
//! holds the traits they implement and the rules applied around them. The
//! clipboard has a system implementation backed by `cli-clipboard`.

pub mod clipboard;
pub mod ocr;
pub mod speech;

pub use clipboard::{ClipboardError, ClipboardSink, SystemClipboard};
pub use ocr::{ImageInput, ImageTextExtractor, OcrError};
pub use speech::{SpeechError, SpeechInput, SpeechOutput, Utterance, Voice};
