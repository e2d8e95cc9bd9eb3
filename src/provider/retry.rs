//! Retry layer for provider calls: exponential backoff with jitter.
//!
//! Failures are classified before the next attempt; a permanent failure
//! (client error, unknown endpoint) surfaces immediately instead of
//! burning through the retry budget.

use anyhow::{anyhow, Result};
use rand::Rng;
use std::fmt;
use std::future::Future;
use tokio::time::{sleep, Duration};

use crate::logging::log_provider_failure;

/// A provider request that completed with a non-success HTTP status.
/// Carrying the status lets the retry layer tell a transient 503 from a
/// permanent 400.
#[derive(Debug)]
pub struct HttpStatusError {
    pub operation: String,
    pub status: u16,
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed with HTTP status {}", self.operation, self.status)
    }
}

impl std::error::Error for HttpStatusError {}

#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 5000,
            jitter_factor: 0.3,
        }
    }
}

impl RetryConfig {
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.base_delay_ms as f64 * 2.0_f64.powi(attempt as i32);
        let clamped = base.min(self.max_delay_ms as f64);

        let jitter_range = clamped * self.jitter_factor;
        let jitter: f64 = if jitter_range > 0.0 {
            rand::thread_rng().gen_range(-jitter_range..=jitter_range)
        } else {
            0.0
        };
        Duration::from_millis((clamped + jitter).max(0.0) as u64)
    }
}

/// Retry a fallible async provider operation with exponential backoff.
/// Permanent failures are returned after the first attempt.
pub async fn retry_async<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error: Option<anyhow::Error> = None;

    for attempt in 0..=config.max_retries {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                log_provider_failure(operation_name, attempt + 1, &e.to_string());
                if !is_retryable(&e) {
                    return Err(e);
                }
                if attempt < config.max_retries {
                    sleep(config.delay_for_attempt(attempt)).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow!("retry_async exhausted without error")))
}

/// Errors without a recognized classification default to retryable.
fn is_retryable(err: &anyhow::Error) -> bool {
    if let Some(http) = err.downcast_ref::<HttpStatusError>() {
        return is_retryable_http_error(http.status);
    }
    if let Some(net) = err.downcast_ref::<reqwest::Error>() {
        return is_retryable_network_error(net);
    }
    true
}

/// HTTP statuses worth retrying; anything else is a hard failure.
pub fn is_retryable_http_error(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

pub fn is_retryable_network_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
