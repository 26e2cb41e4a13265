use std::io::Write;

use crate::core::features::translator::languages::sorted_by_name;
use crate::shared::AppResult;

/// Print the language table, ordered by name
pub fn print_languages(out: &mut impl Write) -> AppResult<()> {
    for (code, name) in sorted_by_name() {
        writeln!(out, "{:<8}{}", code, name)?;
    }
    Ok(())
}
