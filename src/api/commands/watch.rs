//! Interactive session
//!
//! Each stdin line replaces the whole input text and goes through the
//! debouncer, so pasting several lines quickly translates only the last one.
//! Lines starting with `:` are commands.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::core::features::translator::languages::is_supported;
use crate::core::workflow::TranslatorWorkflow;
use crate::shared::emit::ViewBinder;
use crate::shared::events::{AppEvent, NoticeLevel};
use crate::shared::AppResult;
use crate::AppContext;

pub const HELP: &str = "commands: :to <code>  :now  :save  :copy  :detect  :clear  :clear-output  :help  :quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchInput<'a> {
    Text(&'a str),
    Target(&'a str),
    TranslateNow,
    Save,
    Copy,
    Detect,
    ClearInput,
    ClearOutput,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> WatchInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let Some(command) = line.trim().strip_prefix(':') else {
            return WatchInput::Text(line);
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match name {
            "to" => WatchInput::Target(arg),
            "now" => WatchInput::TranslateNow,
            "save" => WatchInput::Save,
            "copy" => WatchInput::Copy,
            "detect" => WatchInput::Detect,
            "clear" => WatchInput::ClearInput,
            "clear-output" => WatchInput::ClearOutput,
            "help" | "?" => WatchInput::Help,
            "quit" | "q" => WatchInput::Quit,
            _ => WatchInput::Unknown(name),
        }
    }
}

pub async fn watch(ctx: &AppContext, view: Arc<dyn ViewBinder>, target: Option<&str>) -> AppResult<()> {
    let workflow = ctx.workflow(view.clone());
    if let Ok(target) = ctx.target_or_default(target) {
        workflow.on_target_language(&target);
    }
    view.render(AppEvent::notice(NoticeLevel::Info, HELP));
    run_session(&workflow, view.as_ref(), BufReader::new(tokio::io::stdin())).await
}

pub async fn run_session<R>(workflow: &TranslatorWorkflow, view: &dyn ViewBinder, input: R) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match WatchInput::parse(&line) {
            WatchInput::Text(text) => {
                workflow.on_input(text);
            }
            WatchInput::Target(code) => {
                if !is_supported(code) {
                    view.render(AppEvent::notice(
                        NoticeLevel::Error,
                        format!("Unknown language code: {}", code),
                    ));
                    continue;
                }
                workflow.on_target_language(code);
            }
            WatchInput::TranslateNow => {
                let _ = workflow.translate_now().await;
            }
            WatchInput::Save => {
                workflow.save_current();
            }
            WatchInput::Copy => {
                let _ = workflow.copy_translation();
            }
            WatchInput::Detect => {
                let _ = workflow.detect_language().await;
            }
            WatchInput::ClearInput => workflow.clear_input(),
            WatchInput::ClearOutput => workflow.clear_output(),
            WatchInput::Help => view.render(AppEvent::notice(NoticeLevel::Info, HELP)),
            WatchInput::Quit => break,
            WatchInput::Unknown(name) => view.render(AppEvent::notice(
                NoticeLevel::Error,
                format!("Unknown command :{} ({})", name, HELP),
            )),
        }
    }

    // Input closed with a translation still waiting for its quiet period
    if workflow.is_translation_pending() {
        debug!("input closed, flushing pending translation");
        let _ = workflow.translate_now().await;
    }
    workflow.wait_for_translations().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collab::clipboard::tests::MemoryClipboard;
    use crate::core::features::translator::tests::FakeTranslator;
    use crate::core::lists::{HistoryStore, VocabularyStore};
    use crate::core::storage::MemoryStore;
    use crate::core::workflow::Services;
    use crate::shared::emit::RecordingView;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    struct Session {
        workflow: TranslatorWorkflow,
        translator: Arc<FakeTranslator>,
        clipboard: Arc<MemoryClipboard>,
        view: RecordingView,
    }

    fn session() -> Session {
        let storage = Arc::new(MemoryStore::new());
        let translator = Arc::new(FakeTranslator::default());
        let clipboard = Arc::new(MemoryClipboard::default());
        let view = RecordingView::new();
        let services = Services::new(
            translator.clone(),
            Arc::new(HistoryStore::history(storage.clone(), 25)),
            Arc::new(VocabularyStore::vocabulary(storage, 100)),
            Arc::new(view.clone()),
        )
        .with_clipboard(clipboard.clone());
        Session {
            workflow: TranslatorWorkflow::new(services, Duration::from_millis(500)),
            translator,
            clipboard,
            view,
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(WatchInput::parse("hello there"), WatchInput::Text("hello there"));
        assert_eq!(WatchInput::parse(":to  fr "), WatchInput::Target("fr"));
        assert_eq!(WatchInput::parse(" :save"), WatchInput::Save);
        assert_eq!(WatchInput::parse(":copy"), WatchInput::Copy);
        assert_eq!(WatchInput::parse(":q"), WatchInput::Quit);
        assert_eq!(WatchInput::parse(":nope"), WatchInput::Unknown("nope"));
    }

    #[tokio::test(start_paused = true)]
    async fn pasted_lines_translate_only_the_last() {
        let s = session();
        s.workflow.on_target_language("es");

        run_session(&s.workflow, &RecordingView::new(), &b"one\ntwo\nthree\n"[..])
            .await
            .unwrap();

        assert_eq!(s.translator.calls(), vec![("three".to_string(), "es".to_string())]);
        assert_eq!(s.workflow.services().history.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_drive_the_workflow() {
        let s = session();
        let notices = RecordingView::new();

        let script = b":to xx\n:to de\nhouse\n:now\n:save\n:copy\n:quit\nignored\n";
        run_session(&s.workflow, &notices, &script[..]).await.unwrap();

        assert_eq!(s.translator.calls(), vec![("house".to_string(), "de".to_string())]);
        assert_eq!(s.workflow.services().vocabulary.len(), 1);
        assert_eq!(s.workflow.input(), "house");
        assert_eq!(s.clipboard.contents().as_deref(), Some("de:house"));
        assert!(notices
            .events()
            .contains(&AppEvent::notice(NoticeLevel::Error, "Unknown language code: xx")));
        assert!(s
            .view
            .events()
            .contains(&AppEvent::notice(NoticeLevel::Success, "Word saved to notebook.")));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_input_waits_for_a_request_in_flight() {
        let s = session();
        s.translator.set_delay(Duration::from_secs(2));
        s.workflow.on_target_language("es");

        let (mut writer, reader) = tokio::io::duplex(64);
        let typing = async move {
            writer.write_all(b"hello\n").await.unwrap();
            // Debounce fires, the request is still running when input closes
            tokio::time::sleep(Duration::from_millis(700)).await;
            drop(writer);
        };

        let view = RecordingView::new();
        let (result, ()) = tokio::join!(
            run_session(&s.workflow, &view, BufReader::new(reader)),
            typing
        );
        result.unwrap();

        assert!(!s.workflow.is_translation_pending());
        assert_eq!(s.workflow.services().history.len(), 1);
        assert_eq!(s.translator.calls(), vec![("hello".to_string(), "es".to_string())]);
    }
}
