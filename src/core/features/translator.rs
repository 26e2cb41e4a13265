//! Translator feature
//!
//! Translation client for the public translation endpoint, plus the shared
//! language table.

pub mod languages;
pub mod service;
pub mod types;

use async_trait::async_trait;

use crate::shared::error::TranslatorResult;
use crate::shared::types::TranslationOutcome;

pub use languages::{language_name, LANGUAGES};
pub use service::TranslatorService;

/// Anything that can turn text into a translation.
///
/// One call issues at most one request and never retries.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` into `target`, auto-detecting the source language
    async fn translate(&self, text: &str, target: &str) -> TranslatorResult<TranslationOutcome>;

    /// Detected source language of `text`, `None` if the service could not tell
    async fn detect_language(&self, text: &str) -> TranslatorResult<Option<String>>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::error::TranslationError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Provider answering `"{target}:{text}"`, recording every call
    #[derive(Default)]
    pub(crate) struct FakeTranslator {
        calls: Mutex<Vec<(String, String)>>,
        pub(crate) fail: AtomicBool,
        delay: Mutex<Duration>,
    }

    impl FakeTranslator {
        pub(crate) fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        /// Answer only after `delay`
        pub(crate) fn set_delay(&self, delay: Duration) {
            *self.delay.lock().unwrap() = delay;
        }
    }

    #[async_trait]
    impl TranslationProvider for FakeTranslator {
        async fn translate(&self, text: &str, target: &str) -> TranslatorResult<TranslationOutcome> {
            self.calls.lock().unwrap().push((text.to_string(), target.to_string()));
            let delay = *self.delay.lock().unwrap();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(TranslationError::ServiceUnavailable("connection refused".to_string()));
            }
            Ok(TranslationOutcome {
                translated_text: format!("{}:{}", target, text),
                detected_language: "en".to_string(),
            })
        }

        async fn detect_language(&self, text: &str) -> TranslatorResult<Option<String>> {
            Ok(if text.starts_with("Bonjour") { Some("fr".to_string()) } else { None })
        }
    }
}
