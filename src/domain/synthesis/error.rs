use crate::error::AppError;
use std::path::PathBuf;

/// Failure of a single synthesis attempt. Always retryable.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider returned no audio")]
    EmptyAudio,
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Conditions that stop a batch before any item is attempted
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("duplicate identifier {0:?}: two items would write the same file")]
    DuplicateIdentifier(String),
    #[error("invalid item {identifier:?}: {reason}")]
    InvalidItem { identifier: String, reason: String },
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot prepare output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::DuplicateIdentifier(_) | BatchError::InvalidItem { .. } => {
                AppError::InvalidInput(err.to_string())
            }
            BatchError::InvalidConfig(msg) => AppError::Configuration(msg),
            BatchError::OutputDirectory { .. } => AppError::Storage(err.to_string()),
        }
    }
}
