use crate::domain::synthesis::{Backoff, BatchConfig, RetryPolicy};
use crate::domain::vocabulary::{LanguageCode, Speed};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::google_tts_repository::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub output_root: PathBuf,
    pub log_format: LogFormat,
    // Synthesis provider
    pub tts_base_url: String,
    pub tts_request_timeout: Duration,
    // Retry policy
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub retry_backoff: Backoff,
    // Item defaults
    pub default_language: LanguageCode,
    pub default_speed: Speed,
    pub audio_extension: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            output_root: PathBuf::from(
                env::var("OUTPUT_ROOT").unwrap_or_else(|_| "assets/audio".to_string()),
            ),
            log_format: match env_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts_base_url: env_or("TTS_BASE_URL", DEFAULT_BASE_URL),
            tts_request_timeout: Duration::from_secs(parse_env("TTS_REQUEST_TIMEOUT_SECS", "15")?),
            max_attempts: parse_env("TTS_MAX_ATTEMPTS", "3")?,
            retry_delay: Duration::from_millis(parse_env("TTS_RETRY_DELAY_MS", "1000")?),
            retry_backoff: parse_env("TTS_RETRY_BACKOFF", "fixed")?,
            default_language: parse_env("TTS_DEFAULT_LANGUAGE", "ja")?,
            default_speed: parse_env("TTS_DEFAULT_SPEED", "normal")?,
            audio_extension: env_or("AUDIO_EXTENSION", "mp3")
                .trim_start_matches('.')
                .to_string(),
        };

        config.batch_config()?;
        Ok(config)
    }

    /// Runner settings derived from this configuration
    pub fn batch_config(&self) -> AppResult<BatchConfig> {
        // The extension is appended to file stems, so it must not add path components
        if !self.audio_extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::Configuration(format!(
                "AUDIO_EXTENSION={:?}: only ASCII letters and digits are allowed",
                self.audio_extension
            )));
        }
        let retry = RetryPolicy::new(self.max_attempts, self.retry_delay, self.retry_backoff)?;
        Ok(BatchConfig {
            retry,
            default_language: self.default_language.clone(),
            default_speed: self.default_speed,
            extension: self.audio_extension.clone(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env_or(key, default);
    raw.trim()
        .parse()
        .map_err(|e| AppError::Configuration(format!("{key}={raw:?}: {e}")))
}
