use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::shared::types::ListFilter;

#[derive(Parser, Debug)]
#[command(name = "lexigo", author, version, about)]
pub struct Cli {
    /// Settings file (overrides LEXIGO_CONFIG and the platform default).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate text once and record it in history
    Translate {
        /// Target language code (defaults to workflow.default_target_lang).
        #[arg(long, short)]
        to: Option<String>,
        /// Also save the result to the notebook.
        #[arg(long, default_value_t = false)]
        save: bool,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Detect the language of some text
    Detect {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Translate lines from stdin as they are typed
    Watch {
        /// Target language code (defaults to workflow.default_target_lang).
        #[arg(long, short)]
        to: Option<String>,
    },
    /// Recent translations
    #[command(subcommand)]
    History(HistoryCommand),
    /// Saved words notebook
    #[command(subcommand)]
    Vocab(VocabCommand),
    /// List supported languages
    Languages,
    /// Inspect settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Only records with this target language ("all" for every language).
    #[arg(long)]
    pub lang: Option<String>,
    /// Case-insensitive text search.
    #[arg(long)]
    pub search: Option<String>,
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl ListArgs {
    pub fn filter(&self) -> ListFilter {
        let mut filter = ListFilter::default();
        if let Some(lang) = &self.lang {
            filter = filter.language(lang.clone());
        }
        if let Some(search) = &self.search {
            filter = filter.search(search.clone());
        }
        filter
    }
}

#[derive(Args, Debug, Clone)]
pub struct CopyArgs {
    pub id: String,
    /// Copy the source text instead of the translation.
    #[arg(long, default_value_t = false)]
    pub source: bool,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    List(ListArgs),
    /// Copy an entry to the clipboard
    Copy(CopyArgs),
    Remove { id: String },
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum VocabCommand {
    List(ListArgs),
    /// Save a translation pair directly
    Save {
        #[arg(long, short)]
        to: String,
        /// Source language code, if known.
        #[arg(long)]
        from: Option<String>,
        source: String,
        translated: String,
    },
    /// Copy a saved word to the clipboard
    Copy(CopyArgs),
    Remove { id: String },
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the settings file location
    Path,
    /// Print the effective settings as JSON
    Show,
}
