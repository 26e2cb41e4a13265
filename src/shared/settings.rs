use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tokio::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::shared::error::{AppError, AppResult};

/// Environment variable that points at an alternative settings file
pub const CONFIG_ENV: &str = "LEXIGO_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct AppSettings {
    pub translation: TranslationSettings,
    pub workflow: WorkflowSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct TranslationSettings {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct WorkflowSettings {
    pub debounce_ms: u64,
    /// Empty means "no target selected"
    pub default_target_lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct StorageSettings {
    pub history_limit: usize,
    pub vocabulary_limit: usize,
    pub preview_limit: usize,
    #[ts(type = "string | null")]
    pub data_dir: Option<PathBuf>,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout_ms: 10_000,
            user_agent: "Mozilla/5.0 (compatible; lexigo)".to_string(),
        }
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            default_target_lang: String::new(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            history_limit: 25,
            vocabulary_limit: 100,
            preview_limit: 5,
            data_dir: None,
        }
    }
}

fn project_dirs() -> AppResult<ProjectDirs> {
    ProjectDirs::from("com", "lexigo", "lexigo")
        .ok_or_else(|| AppError::Config("Failed to determine project directories".to_string()))
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(project_dirs()?.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, writing defaults on first run
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            let settings = Self::default();
            settings.save_to(path).await?;
            info!(path = %path.display(), "wrote default settings");
            return Ok(settings);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Config(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .map_err(|e| AppError::Config(format!("Failed to write settings file: {}", e)))
    }

    /// Directory holding the list database
    pub fn data_dir(&self) -> AppResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}
