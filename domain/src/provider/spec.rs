//! Per-provider dispatch settings

use super::kind::ProviderKind;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exponential backoff between retries.
///
/// The delay before retry `n` (1-based) is `base_delay * 2^(n-1)`, capped at
/// `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl BackoffPolicy {
    pub fn new(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
        }
    }

    /// Delay to wait before the given retry (1-based)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

/// Configuration of one provider.
///
/// Loaded once at startup and shared read-only for the lifetime of the
/// process.
///
/// # Example
///
/// ```
/// use llm_plus_domain::{ProviderKind, ProviderSpec};
/// use std::time::Duration;
///
/// let spec = ProviderSpec::new("gpt", "gpt-4o")
///     .with_timeout(Duration::from_secs(30))
///     .with_max_retries(3);
/// assert_eq!(spec.resolved_kind(), Some(ProviderKind::OpenAi));
/// assert_eq!(spec.max_attempts(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Unique key used in results and tie-break ordering
    pub name: String,
    /// Backend model identifier (e.g., "gpt-4o")
    pub model: String,
    /// Explicit backend; inferred from `model` when absent
    pub kind: Option<ProviderKind>,
    /// Timeout for a single attempt
    pub timeout: Duration,
    /// Retries after the first attempt (0 = single attempt)
    pub max_retries: u32,
    pub backoff: BackoffPolicy,
    pub enabled: bool,
}

impl ProviderSpec {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            kind: None,
            timeout: Duration::from_secs(60),
            max_retries: 2,
            backoff: BackoffPolicy::default(),
            enabled: true,
        }
    }

    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Explicit kind, or the one inferred from the model string
    pub fn resolved_kind(&self) -> Option<ProviderKind> {
        self.kind.or_else(|| ProviderKind::infer(&self.model))
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidProviderSpec(
                "provider name cannot be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(DomainError::InvalidProviderSpec(format!(
                "{}: timeout cannot be 0",
                self.name
            )));
        }
        if self.backoff.base_delay > self.backoff.max_delay {
            return Err(DomainError::InvalidProviderSpec(format!(
                "{}: backoff base delay exceeds its ceiling",
                self.name
            )));
        }
        if self.resolved_kind().is_none() {
            return Err(DomainError::InvalidProviderSpec(format!(
                "{}: cannot infer backend for model '{}', set kind explicitly",
                self.name, self.model
            )));
        }
        Ok(())
    }

    /// The built-in provider set used when nothing is configured
    pub fn defaults() -> Vec<ProviderSpec> {
        vec![
            ProviderSpec::new("gpt", "gpt-4o"),
            ProviderSpec::new("claude", "claude-3-5-sonnet-latest"),
            ProviderSpec::new("gemini", "gemini-1.5-pro"),
        ]
    }
}
