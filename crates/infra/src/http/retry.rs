//! Rate-limit retry policy
//!
//! The portal answers HTTP 429 when a tenant exceeds its request quota. The
//! executor waits and retries such responses up to `max_retries` times; any
//! other failure is returned immediately.

use std::time::Duration;

use async_trait::async_trait;
use portalwatch_domain::constants::DEFAULT_MAX_RATE_LIMIT_RETRIES;
use portalwatch_domain::HttpConfig;

/// Waits between rate-limited attempts.
///
/// Injected so tests can observe (and skip) the delay.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Growth of the delay between rate-limited attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Always wait the request's retry interval
    Fixed,
    /// Double the retry interval on every retry, capped at `max_delay`
    Exponential { max_delay: Duration },
}

/// Bound and pacing of rate-limit retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self { max_retries: DEFAULT_MAX_RATE_LIMIT_RETRIES, backoff: Backoff::Fixed }
    }
}

impl RateLimitPolicy {
    pub fn from_config(http: &HttpConfig) -> Self {
        let backoff = if http.exponential_backoff {
            Backoff::Exponential { max_delay: http.max_backoff() }
        } else {
            Backoff::Fixed
        };
        Self { max_retries: http.max_rate_limit_retries, backoff }
    }

    /// Delay before retry number `retry_number` (1-based).
    pub fn delay_for(&self, retry_number: u32, interval: Duration) -> Duration {
        match self.backoff {
            Backoff::Fixed => interval,
            Backoff::Exponential { max_delay } => {
                let shift = retry_number.saturating_sub(1).min(8);
                interval.saturating_mul(1u32 << shift).min(max_delay)
            }
        }
    }
}
