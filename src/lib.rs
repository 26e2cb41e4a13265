pub mod api;
pub mod core;
pub mod shared;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::api::cli::Cli;
use crate::core::collab::clipboard::{ClipboardSink, SystemClipboard};
use crate::core::features::translator::{TranslationProvider, TranslatorService};
use crate::core::lists::{HistoryStore, VocabularyStore};
use crate::core::storage::{open_store, KeyValueStore};
use crate::core::workflow::{Services, TranslatorWorkflow};
use crate::shared::emit::ViewBinder;
use crate::shared::settings::AppSettings;
use crate::shared::{AppError, AppResult};

/// Long-lived services shared by every command
pub struct AppContext {
    pub settings: AppSettings,
    pub settings_path: PathBuf,
    pub storage: Arc<dyn KeyValueStore>,
    pub history: Arc<HistoryStore>,
    pub vocabulary: Arc<VocabularyStore>,
    pub translator: Arc<dyn TranslationProvider>,
    pub clipboard: Arc<dyn ClipboardSink>,
}

impl AppContext {
    pub fn build(settings: AppSettings, settings_path: PathBuf) -> AppResult<Self> {
        let storage = open_store(&settings.data_dir()?);
        Self::with_storage(settings, settings_path, storage)
    }

    pub fn with_storage(
        settings: AppSettings,
        settings_path: PathBuf,
        storage: Arc<dyn KeyValueStore>,
    ) -> AppResult<Self> {
        let limits = &settings.storage;
        let history = HistoryStore::history(storage.clone(), limits.history_limit)
            .with_preview_limit(limits.preview_limit);
        let vocabulary = VocabularyStore::vocabulary(storage.clone(), limits.vocabulary_limit);
        let translator = TranslatorService::new(&settings.translation)?;

        Ok(Self {
            settings,
            settings_path,
            storage,
            history: Arc::new(history),
            vocabulary: Arc::new(vocabulary),
            translator: Arc::new(translator),
            clipboard: Arc::new(SystemClipboard),
        })
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn services(&self, view: Arc<dyn ViewBinder>) -> Services {
        Services::new(
            self.translator.clone(),
            self.history.clone(),
            self.vocabulary.clone(),
            view,
        )
        .with_clipboard(self.clipboard.clone())
    }

    pub fn workflow(&self, view: Arc<dyn ViewBinder>) -> TranslatorWorkflow {
        let quiet_period = Duration::from_millis(self.settings.workflow.debounce_ms);
        TranslatorWorkflow::new(self.services(view), quiet_period)
    }

    /// Target language from the command line, else the configured default
    pub fn target_or_default(&self, target: Option<&str>) -> AppResult<String> {
        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.settings.workflow.default_target_lang.trim());
        if target.is_empty() {
            return Err(AppError::Validation(
                "Please select a target language (--to <code>)".to_string(),
            ));
        }
        Ok(target.to_string())
    }
}

pub async fn run(cli: Cli) -> AppResult<()> {
    let settings_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppSettings::get_settings_path()?,
    };
    let settings = AppSettings::load_from(&settings_path).await?;
    info!(
        config = %settings_path.display(),
        endpoint = %settings.translation.endpoint,
        debounce_ms = settings.workflow.debounce_ms,
        history_limit = settings.storage.history_limit,
        vocabulary_limit = settings.storage.vocabulary_limit,
        "loaded lexigo settings"
    );

    let ctx = AppContext::build(settings, settings_path)?;
    api::commands::dispatch(&ctx, cli.command).await
}
