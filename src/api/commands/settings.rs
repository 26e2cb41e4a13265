//! Settings command module

use std::io::Write;

use crate::api::cli::SettingsCommand;
use crate::shared::AppResult;
use crate::AppContext;

pub fn settings(ctx: &AppContext, command: SettingsCommand, out: &mut impl Write) -> AppResult<()> {
    match command {
        SettingsCommand::Path => writeln!(out, "{}", ctx.settings_path.display())?,
        SettingsCommand::Show => {
            serde_json::to_writer_pretty(&mut *out, &ctx.settings)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
