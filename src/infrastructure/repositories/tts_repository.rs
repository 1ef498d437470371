use crate::domain::vocabulary::{LanguageCode, Speed};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Translate TTS, test doubles, ...)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into chunks if needed
/// - Merging audio chunks into a single audio stream
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech for a given language and speaking rate
    ///
    /// Returns encoded audio ready to be written to disk verbatim
    ///
    /// # Arguments
    /// * `text` - The text to synthesize
    /// * `language` - The target language for synthesis
    /// * `speed` - Normal or slow delivery
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable.
    /// Callers treat every error as transient.
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
        speed: Speed,
    ) -> Result<Vec<u8>, String>;
}
