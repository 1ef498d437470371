use super::tts_repository::TtsRepository;
use crate::domain::vocabulary::{LanguageCode, Speed};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// Google Translate TTS rejects requests longer than 100 characters
const MAX_BATCH_CHARS: usize = 100;

pub const DEFAULT_BASE_URL: &str = "https://translate.google.com";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) kana-audio-gen";

/// Sentence and clause boundaries, Japanese and Latin punctuation
static BOUNDARY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[。、！？!?.,]+\s*").expect("boundary pattern is valid"));

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
}

impl GoogleTtsRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Value of the `ttsspeed` query parameter
    fn speed_param(speed: Speed) -> &'static str {
        match speed {
            Speed::Normal => "1",
            Speed::Slow => "0.3",
        }
    }

    /// Split text into batches that respect sentence and clause boundaries.
    /// Each batch is at most MAX_BATCH_CHARS characters (not bytes).
    fn split_into_batches(text: &str) -> Vec<String> {
        let text = text.trim();
        if text.chars().count() <= MAX_BATCH_CHARS {
            return vec![text.to_string()];
        }

        let mut chunker = Chunker::default();
        let mut last_end = 0;

        for mat in BOUNDARY_PATTERN.find_iter(text) {
            chunker.push(&text[last_end..mat.end()]);
            last_end = mat.end();
        }

        // Handle remaining text after last boundary
        if last_end < text.len() {
            chunker.push(&text[last_end..]);
        }

        chunker.finish()
    }

    /// Call the translate_tts endpoint for a single chunk
    async fn call_google(
        &self,
        text: &str,
        index: usize,
        total: usize,
        language: &LanguageCode,
        speed: Speed,
    ) -> Result<Vec<u8>, String> {
        let url = format!("{}/translate_tts", self.base_url);
        let text_len = text.chars().count().to_string();
        let index = index.to_string();
        let total = total.to_string();

        tracing::debug!(
            language = %language,
            speed = %speed,
            chunk_index = %index,
            text_length = text.chars().count(),
            "Calling Google TTS"
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", language.as_str()),
                ("ttsspeed", Self::speed_param(speed)),
                ("total", total.as_str()),
                ("idx", index.as_str()),
                ("textlen", text_len.as_str()),
                ("client", "tw-ob"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Google TTS request failed");
                format!("Google TTS request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let preview: String = error_text.chars().take(200).collect();
            return Err(format!("Google TTS returned {}: {}", status, preview));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS audio: {}", e))?
            .to_vec();

        tracing::debug!(audio_size = audio_bytes.len(), "Google TTS audio received");

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
        speed: Speed,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = Self::split_into_batches(text);

        // MP3 frames concatenate cleanly, so chunks are merged in order
        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self
                .call_google(batch, index, batches.len(), language, speed)
                .await?;
            merged_audio.extend(audio_data);
        }

        tracing::debug!(
            provider = "google",
            latency_ms = start_time.elapsed().as_millis() as u64,
            characters_count = text.chars().count(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}

/// Accumulates text pieces into batches of at most MAX_BATCH_CHARS
#[derive(Default)]
struct Chunker {
    batches: Vec<String>,
    current: String,
    current_len: usize,
}

impl Chunker {
    fn push(&mut self, piece: &str) {
        let piece_len = piece.chars().count();

        // If adding this piece would exceed the limit, save current batch
        if self.current_len > 0 && self.current_len + piece_len > MAX_BATCH_CHARS {
            self.flush();
        }

        // A piece with no usable boundary is split by characters
        if piece_len > MAX_BATCH_CHARS {
            let chars: Vec<char> = piece.chars().collect();
            for chunk in chars.chunks(MAX_BATCH_CHARS) {
                self.current = chunk.iter().collect();
                self.current_len = chunk.len();
                self.flush();
            }
        } else {
            self.current.push_str(piece);
            self.current_len += piece_len;
        }
    }

    fn flush(&mut self) {
        let batch = self.current.trim();
        if !batch.is_empty() {
            self.batches.push(batch.to_string());
        }
        self.current.clear();
        self.current_len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.batches
    }
}
