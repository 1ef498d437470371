use super::error::{BatchError, SynthesisError};
use super::model::{BatchConfig, BatchResult};
use super::retry::retry;
use crate::domain::vocabulary::VocabularyItem;
use crate::infrastructure::repositories::{AudioFileRepository, TtsRepository};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;

pub struct BatchRunner {
    tts_repo: Arc<dyn TtsRepository>,
    audio_repo: Arc<AudioFileRepository>,
}

impl BatchRunner {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, audio_repo: Arc<AudioFileRepository>) -> Self {
        Self {
            tts_repo,
            audio_repo,
        }
    }
}

#[async_trait]
pub trait BatchRunnerApi: Send + Sync {
    /// Drive every item through synthesis and collect the outcome
    ///
    /// This operation:
    /// - Rejects duplicate or unusable identifiers before any synthesis call
    /// - Creates `base_dir` (with parents) if it is missing and checks it is writable
    /// - Synthesizes items in order, retrying each one per `config.retry`
    /// - Writes each clip to `base_dir/<id>.<extension>`, replacing old content
    ///
    /// Per-item failures are reported in the returned `BatchResult`; only
    /// invalid input and an unusable output directory are errors.
    async fn run(
        &self,
        items: &[VocabularyItem],
        base_dir: &Path,
        config: &BatchConfig,
    ) -> Result<BatchResult, BatchError>;
}

#[async_trait]
impl BatchRunnerApi for BatchRunner {
    async fn run(
        &self,
        items: &[VocabularyItem],
        base_dir: &Path,
        config: &BatchConfig,
    ) -> Result<BatchResult, BatchError> {
        // 1. Validate the whole batch up front
        validate_items(items)?;

        // 2. Prepare the output directory
        self.audio_repo
            .ensure_directory(base_dir)
            .await
            .map_err(|source| BatchError::OutputDirectory {
                path: base_dir.to_path_buf(),
                source,
            })?;

        tracing::info!(
            total = items.len(),
            directory = %base_dir.display(),
            max_attempts = config.retry.max_attempts(),
            retry_delay_ms = config.retry.delay().as_millis() as u64,
            "Starting batch"
        );

        // 3. Process items strictly in order
        let mut failed_identifiers = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let span = tracing::info_span!("item", id = %item.id, position = index + 1);
            let succeeded = self.process_item(item, base_dir, config).instrument(span).await;
            if !succeeded {
                failed_identifiers.push(item.id.clone());
            }
        }

        let result = BatchResult::from_failures(items.len(), failed_identifiers);

        tracing::info!(
            total = result.total,
            succeeded = result.succeeded,
            failed = result.failed_identifiers.len(),
            directory = %base_dir.display(),
            "Batch finished"
        );

        Ok(result)
    }
}

impl BatchRunner {
    /// Returns true when the item ended in `Succeeded`
    async fn process_item(&self, item: &VocabularyItem, base_dir: &Path, config: &BatchConfig) -> bool {
        let target = self
            .audio_repo
            .target_path(base_dir, &item.id, &config.extension);
        let language = item.language.as_ref().unwrap_or(&config.default_language);
        let speed = item.speed.unwrap_or(config.default_speed);

        let tts_repo = self.tts_repo.as_ref();
        let audio_repo = self.audio_repo.as_ref();
        let text = item.text.as_str();
        let target_path = target.as_path();

        let outcome = retry(&config.retry, move |attempt| async move {
            tracing::debug!(
                attempt = attempt,
                language = %language,
                speed = %speed,
                "Synthesizing"
            );

            let audio = tts_repo
                .synthesize(text, language, speed)
                .await
                .map_err(SynthesisError::Provider)?;

            if audio.is_empty() {
                return Err(SynthesisError::EmptyAudio);
            }

            audio_repo
                .write(target_path, &audio)
                .await
                .map_err(|source| SynthesisError::Write {
                    path: target_path.to_path_buf(),
                    source,
                })?;

            Ok(audio.len())
        })
        .await;

        match outcome {
            Ok((bytes, attempts)) => {
                tracing::info!(
                    path = %target.display(),
                    bytes = bytes,
                    attempts = attempts,
                    "Clip written"
                );
                true
            }
            Err(exhausted) => {
                tracing::error!(
                    path = %target.display(),
                    attempts = exhausted.attempts,
                    error = %exhausted.last_error,
                    "Giving up on item"
                );
                false
            }
        }
    }
}

fn validate_items(items: &[VocabularyItem]) -> Result<(), BatchError> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        validate_identifier(&item.id)?;

        if item.text.trim().is_empty() {
            return Err(BatchError::InvalidItem {
                identifier: item.id.clone(),
                reason: "source text is empty".to_string(),
            });
        }

        if !seen.insert(item.id.as_str()) {
            return Err(BatchError::DuplicateIdentifier(item.id.clone()));
        }
    }

    Ok(())
}

/// Identifiers become file stems, so they must stay inside the base directory
fn validate_identifier(id: &str) -> Result<(), BatchError> {
    let reason = if id.trim().is_empty() {
        Some("identifier is empty")
    } else if id == "." || id == ".." {
        Some("identifier cannot be a relative path component")
    } else if id.contains(['/', '\\']) {
        Some("identifier cannot contain path separators")
    } else if id.chars().any(char::is_control) {
        Some("identifier cannot contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(BatchError::InvalidItem {
            identifier: id.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
