use crate::error::AppError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),
    #[error("invalid speed: {0:?} (expected normal or slow)")]
    InvalidSpeed(String),
    #[error("unknown vocabulary set: {0}")]
    UnknownSet(String),
    #[error("set directory must be a relative path without '..': {}", .0.display())]
    UnsafeDirectory(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<VocabularyError> for AppError {
    fn from(err: VocabularyError) -> Self {
        match err {
            VocabularyError::InvalidLanguage(_) | VocabularyError::InvalidSpeed(_) => {
                AppError::Configuration(err.to_string())
            }
            _ => AppError::InvalidInput(err.to_string()),
        }
    }
}
