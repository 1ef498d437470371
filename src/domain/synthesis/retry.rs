use super::error::BatchError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// How the pause grows between consecutive attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Same pause before every retry
    #[default]
    Fixed,
    /// Pause multiplied by the number of the attempt that just failed
    Linear,
}

impl FromStr for Backoff {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Backoff::Fixed),
            "linear" => Ok(Backoff::Linear),
            other => Err(BatchError::InvalidConfig(format!(
                "unknown backoff {other:?} (expected fixed or linear)"
            ))),
        }
    }
}

/// Bounded retry settings. `max_attempts` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration, backoff: Backoff) -> Result<Self, BatchError> {
        if max_attempts == 0 {
            return Err(BatchError::InvalidConfig(
                "max attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            delay,
            backoff,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Pause to observe after attempt number `failed_attempt` (1-based) failed
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Linear => self
                .delay
                .checked_mul(failed_attempt.max(1))
                .unwrap_or(self.delay),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
            backoff: Backoff::Fixed,
        }
    }
}

/// Every attempt failed
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// The operation receives the 1-based attempt number. On success the value is
/// returned together with the number of attempts consumed. There is no pause
/// after the final attempt.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<(T, u32), Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok((value, attempt)),
            Err(error) if attempt >= policy.max_attempts => {
                return Err(Exhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }
            Err(error) => {
                let pause = policy.delay_after(attempt);
                tracing::warn!(
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    retry_in_ms = pause.as_millis() as u64,
                    error = %error,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(pause).await;
                attempt += 1;
            }
        }
    }
}
