/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get the process exit status for this error (sysexits.h values where one fits)
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) | Self::InvalidInput(_) => 64,
            Self::Storage(_) => 73,
            Self::Io(_) => 1,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
