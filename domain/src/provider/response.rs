//! Dispatch outcomes for a single provider

use super::error::{ProviderError, ProviderErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of dispatching a prompt to one provider.
///
/// Holds either the raw answer text or the final error after retries, plus
/// how long it took and how many attempts were made.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub provider: String,
    pub outcome: Result<String, ProviderError>,
    /// Wall-clock time from the first attempt to the final outcome
    pub latency: Duration,
    pub attempts: u32,
}

impl RawResponse {
    pub fn success(
        provider: impl Into<String>,
        text: impl Into<String>,
        latency: Duration,
        attempts: u32,
    ) -> Self {
        Self {
            provider: provider.into(),
            outcome: Ok(text.into()),
            latency,
            attempts,
        }
    }

    pub fn failure(
        provider: impl Into<String>,
        error: ProviderError,
        latency: Duration,
        attempts: u32,
    ) -> Self {
        Self {
            provider: provider.into(),
            outcome: Err(error),
            latency,
            attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&ProviderError> {
        self.outcome.as_ref().err()
    }

    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }

    /// Convert a failed response into its failure-list entry
    pub fn to_failure(&self) -> Option<ProviderFailure> {
        self.error().map(|e| {
            ProviderFailure::from_error(&self.provider, e, self.attempts, self.latency_ms())
        })
    }
}

/// A provider that produced no usable answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider: String,
    pub kind: ProviderErrorKind,
    pub message: String,
    pub attempts: u32,
    pub latency_ms: u64,
}

impl ProviderFailure {
    pub fn new(
        provider: impl Into<String>,
        kind: ProviderErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            kind,
            message: message.into(),
            attempts: 1,
            latency_ms: 0,
        }
    }

    pub fn from_error(
        provider: impl Into<String>,
        error: &ProviderError,
        attempts: u32,
        latency_ms: u64,
    ) -> Self {
        Self {
            provider: provider.into(),
            kind: error.kind(),
            message: error.message().to_string(),
            attempts,
            latency_ms,
        }
    }
}
