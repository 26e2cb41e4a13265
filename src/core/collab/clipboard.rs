use cli_clipboard::{ClipboardContext, ClipboardProvider};
use thiserror::Error;
use tracing::debug;

use crate::shared::AppError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Nothing to copy!")]
    NothingToCopy,

    #[error("Copy failed. Please copy manually. ({0})")]
    Unavailable(String),
}

impl From<ClipboardError> for AppError {
    fn from(err: ClipboardError) -> Self {
        match err {
            ClipboardError::NothingToCopy => AppError::Validation("Nothing to copy!".to_string()),
            ClipboardError::Unavailable(msg) => AppError::Io(msg),
        }
    }
}

/// Destination for copied text
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// Copy `text`, rejecting blank text
pub fn copy_text(sink: &dyn ClipboardSink, text: &str) -> Result<(), ClipboardError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ClipboardError::NothingToCopy);
    }
    sink.set_text(text)?;
    debug!(chars = text.chars().count(), "copied text to clipboard");
    Ok(())
}
