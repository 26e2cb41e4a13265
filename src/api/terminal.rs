use std::io::{self, Write};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::core::features::translator::language_name;
use crate::shared::emit::ViewBinder;
use crate::shared::events::{AppEvent, NoticeLevel};
use crate::shared::types::{InputLengthStatus, TranslationRecord};

/// Renders workflow events as lines of text
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write + Send> ViewBinder for TerminalView<W> {
    fn render(&self, event: AppEvent) {
        match event {
            AppEvent::TranslationReady {
                target_language,
                outcome,
                ..
            } => {
                self.line(&format!(
                    "{}  [{} -> {}]",
                    outcome.translated_text,
                    language_name(&outcome.detected_language),
                    language_name(&target_language)
                ));
            }
            AppEvent::TranslationFailed(message) => self.line(&format!("error: {}", message)),
            AppEvent::Notice { level, message } => {
                let prefix = match level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Success => "ok",
                    NoticeLevel::Error => "error",
                };
                self.line(&format!("{}: {}", prefix, message));
            }
            AppEvent::InputChanged { text, length } => match length {
                InputLengthStatus::Normal => {}
                InputLengthStatus::Warning | InputLengthStatus::Danger => self.line(&format!(
                    "warning: input is {} characters long",
                    text.chars().count()
                )),
            },
            other => debug!(event = other.name(), "not rendered"),
        }
    }
}

/// One-line summary of a stored record
pub fn format_record(record: &TranslationRecord) -> String {
    format!(
        "{}  {} -> {}  {} => {}  ({})",
        record.id,
        language_name(&record.detected_language),
        language_name(&record.target_language),
        record.source_text,
        record.translated_text,
        record.timestamp.format("%Y-%m-%d %H:%M")
    )
}
