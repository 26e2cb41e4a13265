use thiserror::Error;
use serde::Serialize;

#[derive(Error, Debug, Serialize)]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Config Error: {0}")]
    Config(String),
}

/// Failures of a single translate call.
///
/// `ServiceUnavailable` covers transport errors, non-success statuses and
/// bodies that do not have the expected array shape. `Validation` means the
/// call was never attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum TranslationError {
    #[error("Translation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid translation request: {0}")]
    Validation(String),
}

/// Persistence layer errors. The list stores recover from these locally.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),

    #[error("stored data is corrupt: {0}")]
    PersistenceCorrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Serialization error: {}", err))
    }
}

impl From<TranslationError> for AppError {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::ServiceUnavailable(msg) => AppError::Network(msg),
            TranslationError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
pub type TranslatorResult<T> = Result<T, TranslationError>;
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_errors_map_onto_app_errors() {
        let err: AppError = TranslationError::ServiceUnavailable("503".to_string()).into();
        assert!(matches!(err, AppError::Network(ref msg) if msg == "503"));

        let err: AppError = TranslationError::Validation("empty text".to_string()).into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn translation_error_serializes_tagged() {
        let json = serde_json::to_value(TranslationError::ServiceUnavailable("down".into())).unwrap();
        assert_eq!(json["type"], "ServiceUnavailable");
        assert_eq!(json["message"], "down");
    }
}
