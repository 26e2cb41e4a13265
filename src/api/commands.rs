//! Command handlers for the `lexigo` binary
//!
//! One submodule per feature area (no mod.rs pattern):
//!
//! - `translate`: one-shot translate and detect
//! - `watch`: interactive session over stdin
//! - `lists`: history and notebook management
//! - `languages`: the language table
//! - `settings`: settings inspection

pub mod languages;
pub mod lists;
pub mod settings;
pub mod translate;
pub mod watch;

use std::io;
use std::sync::Arc;

use crate::api::cli::Command;
use crate::api::terminal::TerminalView;
use crate::shared::AppResult;
use crate::AppContext;

pub async fn dispatch(ctx: &AppContext, command: Command) -> AppResult<()> {
    let view = Arc::new(TerminalView::stdout());
    let mut out = io::stdout();

    match command {
        Command::Translate { to, save, text } => {
            translate::translate(ctx, view, to.as_deref(), &text, save).await
        }
        Command::Detect { text } => translate::detect(ctx, view, &text).await,
        Command::Watch { to } => watch::watch(ctx, view, to.as_deref()).await,
        Command::History(cmd) => lists::history(ctx, view, cmd, &mut out),
        Command::Vocab(cmd) => lists::vocabulary(ctx, view, cmd, &mut out),
        Command::Languages => languages::print_languages(&mut out),
        Command::Settings(cmd) => settings::settings(ctx, cmd, &mut out),
    }
}
