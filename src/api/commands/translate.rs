//! One-shot translate and detect commands

use std::sync::Arc;

use crate::core::workflow::TranslatorWorkflow;
use crate::shared::emit::ViewBinder;
use crate::shared::types::TranslationOutcome;
use crate::shared::{AppError, AppResult};
use crate::AppContext;

/// Translate `text` into `target`, optionally saving it to the notebook
pub async fn translate_text(
    workflow: &TranslatorWorkflow,
    target: &str,
    text: &str,
    save: bool,
) -> AppResult<TranslationOutcome> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Please enter text to translate".to_string()));
    }

    workflow.on_target_language(target);
    workflow.on_input(text);
    let outcome = workflow.translate_now().await?;

    if save {
        workflow.save_current();
    }
    Ok(outcome)
}

pub async fn translate(
    ctx: &AppContext,
    view: Arc<dyn ViewBinder>,
    target: Option<&str>,
    words: &[String],
    save: bool,
) -> AppResult<()> {
    let target = ctx.target_or_default(target)?;
    let workflow = ctx.workflow(view);
    translate_text(&workflow, &target, &words.join(" "), save).await?;
    Ok(())
}

pub async fn detect(ctx: &AppContext, view: Arc<dyn ViewBinder>, words: &[String]) -> AppResult<()> {
    let workflow = ctx.workflow(view);
    workflow.on_input(&words.join(" "));
    workflow.detect_language().await?;
    Ok(())
}
