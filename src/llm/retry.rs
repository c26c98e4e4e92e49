//! Retry policy with exponential backoff and jitter.
//!
//! The delay before retry `k` (0-indexed) is `base * 2^k` plus a uniform
//! jitter in `[0, max_jitter]`. A rate-limit error carrying a retry-after
//! value replaces that attempt's delay with exactly the requested wait.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::RngExt;

use crate::error::LlmError;
use crate::llm::config::GatewayConfig;

/// Something that can wait. Abstracted so tests can observe backoff.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Non-blocking sleep on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded retry policy.
#[derive(Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_jitter: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_jitter", &self.max_jitter)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    /// Create a policy that sleeps on the tokio timer.
    pub fn new(max_retries: u32, base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_jitter,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Policy from gateway configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.max_retries, config.base_delay, config.max_jitter)
    }

    /// Replace the sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before retry `attempt` (0-indexed) following `error`.
    pub fn delay_for(&self, attempt: u32, error: &LlmError) -> Duration {
        if let Some(seconds) = error.retry_after_secs() {
            return Duration::from_secs(seconds);
        }

        let factor = 2u32.saturating_pow(attempt);
        let exponential = self.base_delay.saturating_mul(factor);
        exponential.saturating_add(self.jitter())
    }

    fn jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=max_ms))
    }

    /// Run `operation` until it succeeds, fails non-retryably, or the retry
    /// budget is spent. The last error is returned on exhaustion.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, LlmError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LlmError>>,
    {
        let mut attempt = 0u32;

        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !err.is_retryable() {
                tracing::warn!(
                    operation = label,
                    attempt = attempt + 1,
                    error = %err,
                    "Non-retryable error, giving up"
                );
                return Err(err);
            }

            if attempt >= self.max_retries {
                tracing::error!(
                    operation = label,
                    attempts = attempt + 1,
                    error = %err,
                    "Max retries exceeded"
                );
                return Err(err);
            }

            let delay = self.delay_for(attempt, &err);
            tracing::warn!(
                operation = label,
                attempt = attempt + 1,
                max_retries = self.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Transient error, will retry"
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&GatewayConfig::default())
    }
}
