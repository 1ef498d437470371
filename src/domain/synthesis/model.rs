use super::retry::RetryPolicy;
use crate::domain::vocabulary::{LanguageCode, Speed};
use serde::{Deserialize, Serialize};

/// Per-batch settings for the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub retry: RetryPolicy,
    pub default_language: LanguageCode,
    pub default_speed: Speed,
    /// Extension of every output file, without the dot
    pub extension: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            default_language: LanguageCode::japanese(),
            default_speed: Speed::Normal,
            extension: "mp3".to_string(),
        }
    }
}

/// Outcome of one batch. `succeeded + failed_identifiers.len() == total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed_identifiers: Vec<String>,
}

impl BatchResult {
    pub(crate) fn from_failures(total: usize, failed_identifiers: Vec<String>) -> Self {
        Self {
            total,
            succeeded: total.saturating_sub(failed_identifiers.len()),
            failed_identifiers,
        }
    }

    /// True when every item reached `Succeeded`
    pub fn is_complete(&self) -> bool {
        self.failed_identifiers.is_empty()
    }
}
