//! Rate-limit retry policy and response status classification.

use std::time::Duration;

/// Status the Börsdata API answers with when a client exceeds its request quota.
pub const RATE_LIMIT_STATUS: u16 = 429;

/// Delay between attempts on a rate-limited request, in milliseconds.
pub const RETRY_DELAY_MS: u64 = 300;

/// How the pipeline reacts to rate-limit responses.
///
/// The delay is fixed: there is no backoff growth and no jitter. With
/// `max_attempts` unset the request is resent until the server stops
/// answering 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait between two attempts.
    pub delay: Duration,
    /// Total number of attempts (first request included), or `None` for no limit.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(RETRY_DELAY_MS),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Retry forever, waiting `delay` between attempts.
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    /// Give up after `max_attempts` requests in total.
    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: Some(max_attempts.max(1)),
        }
    }

    /// Whether another request may be sent after `attempt` requests (1-based) were rate limited.
    pub fn should_retry(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempt < max,
            None => true,
        }
    }
}

/// What the pipeline should do with a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    RateLimited,
    Failure,
}

/// Classifies a response status for the pipeline.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        RATE_LIMIT_STATUS => StatusClass::RateLimited,
        200..=299 => StatusClass::Success,
        _ => StatusClass::Failure,
    }
}
