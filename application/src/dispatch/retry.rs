//! Per-provider retry, backoff and deadline bookkeeping

use llm_plus_domain::{ProviderError, ProviderSpec};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// What to do after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the delay, then try again
    Retry(Duration),
    /// The error is final (not retryable, or attempts exhausted)
    GiveUp,
    /// Another attempt cannot start before the prompt deadline
    OutOfTime,
}

/// Explicit retry state for one provider within one dispatch.
///
/// Owns the attempt counter and knows both the provider's per-attempt timeout
/// and the prompt-wide deadline; whichever is earlier bounds each attempt.
#[derive(Debug, Clone)]
pub struct RetryState {
    spec: Arc<ProviderSpec>,
    deadline: Instant,
    attempts: u32,
    started: Instant,
}

impl RetryState {
    pub fn new(spec: Arc<ProviderSpec>, deadline: Instant) -> Self {
        Self {
            spec,
            deadline,
            attempts: 0,
            started: Instant::now(),
        }
    }

    /// Attempts started so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Start an attempt, returning the instant it must finish by
    pub fn begin_attempt(&mut self) -> Instant {
        self.attempts += 1;
        (Instant::now() + self.spec.timeout).min(self.deadline)
    }

    /// Whether the prompt deadline has already passed at `now`
    pub fn is_past_deadline(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Decide what follows a failed attempt observed at `now`
    pub fn next_step(&self, error: &ProviderError, now: Instant) -> RetryDecision {
        if self.is_past_deadline(now) {
            return RetryDecision::OutOfTime;
        }
        if !error.is_retryable() || self.attempts >= self.spec.max_attempts() {
            return RetryDecision::GiveUp;
        }
        let delay = self.spec.backoff.delay_for_retry(self.attempts);
        if now + delay >= self.deadline {
            return RetryDecision::OutOfTime;
        }
        RetryDecision::Retry(delay)
    }
}
