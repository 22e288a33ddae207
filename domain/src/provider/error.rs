//! Provider error taxonomy
//!
//! Every adapter converts its backend-specific failures (auth errors, HTTP
//! status codes, decode failures, network errors) into [`ProviderError`].
//! The dispatch layer decides on retries from [`ProviderError::is_retryable`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed provider attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        ProviderError::Unavailable(message.into())
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        ProviderError::RateLimited(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ProviderError::InvalidResponse(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ProviderError::Timeout(message.into())
    }

    /// The message-free classification of this error
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::Unavailable(_) => ProviderErrorKind::Unavailable,
            ProviderError::RateLimited(_) => ProviderErrorKind::RateLimited,
            ProviderError::InvalidResponse(_) => ProviderErrorKind::InvalidResponse,
            ProviderError::Timeout(_) => ProviderErrorKind::Timeout,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProviderError::Unavailable(m)
            | ProviderError::RateLimited(m)
            | ProviderError::InvalidResponse(m)
            | ProviderError::Timeout(m) => m,
        }
    }

    /// Whether another attempt could succeed.
    ///
    /// `InvalidResponse` is deterministic: the same prompt yields the same
    /// unusable output, so it is never retried.
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

/// Classification of a provider failure, as reported in the output record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderErrorKind {
    Unavailable,
    RateLimited,
    InvalidResponse,
    Timeout,
}

impl ProviderErrorKind {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderErrorKind::InvalidResponse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorKind::Unavailable => "Unavailable",
            ProviderErrorKind::RateLimited => "RateLimited",
            ProviderErrorKind::InvalidResponse => "InvalidResponse",
            ProviderErrorKind::Timeout => "Timeout",
        }
    }
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
