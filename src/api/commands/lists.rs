//! History and notebook commands

use std::io::Write;
use std::sync::Arc;

use crate::api::cli::{HistoryCommand, ListArgs, VocabCommand};
use crate::api::terminal::format_record;
use crate::core::lists::BoundedList;
use crate::shared::emit::ViewBinder;
use crate::shared::types::{NewEntry, TranslationRecord};
use crate::shared::{AppError, AppResult};
use crate::AppContext;

/// Print the records of `list` that pass the filter in `args`
pub fn print_list(
    list: &BoundedList<TranslationRecord>,
    args: &ListArgs,
    out: &mut impl Write,
) -> AppResult<()> {
    let records = list.list(&args.filter());

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "No entries.")?;
        return Ok(());
    }
    for record in &records {
        writeln!(out, "{}", format_record(record))?;
    }
    Ok(())
}

fn not_found(id: &str) -> AppError {
    AppError::Validation(format!("No entry with id {}", id))
}

pub fn history(
    ctx: &AppContext,
    view: Arc<dyn ViewBinder>,
    command: HistoryCommand,
    out: &mut impl Write,
) -> AppResult<()> {
    match command {
        HistoryCommand::List(args) => print_list(&ctx.history, &args, out),
        HistoryCommand::Copy(args) => {
            ctx.workflow(view).copy_history_entry(&args.id, args.source)?;
            Ok(())
        }
        HistoryCommand::Remove { id } => {
            if ctx.workflow(view).remove_history_entry(&id) {
                Ok(())
            } else {
                Err(not_found(&id))
            }
        }
        HistoryCommand::Clear => {
            ctx.workflow(view).clear_history();
            Ok(())
        }
    }
}

pub fn vocabulary(
    ctx: &AppContext,
    view: Arc<dyn ViewBinder>,
    command: VocabCommand,
    out: &mut impl Write,
) -> AppResult<()> {
    match command {
        VocabCommand::List(args) => print_list(&ctx.vocabulary, &args, out),
        VocabCommand::Save {
            to,
            from,
            source,
            translated,
        } => {
            let record = ctx
                .vocabulary
                .add(NewEntry {
                    source_text: source,
                    translated_text: translated,
                    target_language: to,
                    detected_language: from,
                })
                .ok_or_else(|| {
                    AppError::Validation("Could not save: both texts are required".to_string())
                })?;
            writeln!(out, "{}", format_record(&record))?;
            Ok(())
        }
        VocabCommand::Copy(args) => {
            ctx.workflow(view).copy_saved_word(&args.id, args.source)?;
            Ok(())
        }
        VocabCommand::Remove { id } => {
            if ctx.workflow(view).remove_saved_word(&id) {
                Ok(())
            } else {
                Err(not_found(&id))
            }
        }
        VocabCommand::Clear => {
            ctx.workflow(view).clear_vocabulary();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cli::CopyArgs;
    use crate::core::collab::clipboard::tests::MemoryClipboard;
    use crate::core::storage::tests::ReadOnlyStore;
    use crate::core::storage::MemoryStore;
    use crate::shared::emit::RecordingView;
    use crate::shared::settings::AppSettings;
    use std::path::PathBuf;

    fn context() -> AppContext {
        AppContext::with_storage(
            AppSettings::default(),
            PathBuf::from("settings.json"),
            Arc::new(MemoryStore::new()),
        )
        .unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> AppResult<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_list_prints_placeholder() {
        let ctx = context();
        let text = output(|out| print_list(&ctx.history, &ListArgs::default(), out));
        assert_eq!(text, "No entries.\n");
    }

    #[test]
    fn list_filters_by_language() {
        let ctx = context();
        ctx.history.add(NewEntry::new("hello", "hola", "es", "en"));
        ctx.history.add(NewEntry::new("hello", "bonjour", "fr", "en"));

        let args = ListArgs {
            lang: Some("fr".into()),
            ..ListArgs::default()
        };
        let text = output(|out| print_list(&ctx.history, &args, out));
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("hello => bonjour"));
    }

    #[test]
    fn json_output_is_camel_case() {
        let ctx = context();
        ctx.vocabulary.add(NewEntry::new("cat", "gato", "es", "en"));

        let args = ListArgs {
            json: true,
            ..ListArgs::default()
        };
        let text = output(|out| print_list(&ctx.vocabulary, &args, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["translatedText"], "gato");
    }

    #[test]
    fn vocab_save_and_remove() {
        let ctx = context();
        let view: Arc<dyn ViewBinder> = Arc::new(RecordingView::new());

        let command = VocabCommand::Save {
            to: "es".into(),
            from: None,
            source: "cat".into(),
            translated: "gato".into(),
        };
        output(|out| vocabulary(&ctx, view.clone(), command, out));
        let saved = ctx.vocabulary.all();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].detected_language, "auto");

        let remove = VocabCommand::Remove { id: saved[0].id.clone() };
        output(|out| vocabulary(&ctx, view.clone(), remove, out));
        assert!(ctx.vocabulary.is_empty());

        let missing = VocabCommand::Remove { id: "missing".into() };
        let err = vocabulary(&ctx, view, missing, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn copy_commands_use_the_clipboard() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let ctx = context().with_clipboard(clipboard.clone());
        let view: Arc<dyn ViewBinder> = Arc::new(RecordingView::new());
        let entry = ctx.history.add(NewEntry::new("hello", "hola", "es", "en")).unwrap();
        let word = ctx.vocabulary.add(NewEntry::new("cat", "gato", "es", "en")).unwrap();

        let copy = |id: &str, source| CopyArgs { id: id.to_string(), source };

        history(&ctx, view.clone(), HistoryCommand::Copy(copy(&entry.id, false)), &mut Vec::new()).unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("hola"));

        vocabulary(&ctx, view.clone(), VocabCommand::Copy(copy(&word.id, true)), &mut Vec::new()).unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("cat"));

        let err = history(&ctx, view, HistoryCommand::Copy(copy("missing", false)), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn vocab_save_fails_when_storage_rejects_write() {
        let ctx = AppContext::with_storage(
            AppSettings::default(),
            PathBuf::from("settings.json"),
            Arc::new(ReadOnlyStore),
        )
        .unwrap();
        let command = VocabCommand::Save {
            to: "es".into(),
            from: None,
            source: "cat".into(),
            translated: "gato".into(),
        };

        let mut out = Vec::new();
        let err = vocabulary(&ctx, Arc::new(RecordingView::new()), command, &mut out).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn history_clear_empties_store() {
        let ctx = context();
        ctx.history.add(NewEntry::new("hello", "hola", "es", "en"));

        output(|out| history(&ctx, Arc::new(RecordingView::new()), HistoryCommand::Clear, out));
        assert!(ctx.history.is_empty());
    }
}
