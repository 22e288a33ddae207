//! Wire shape of one finished run

use crate::consensus::StrategyKind;
use crate::core::prompt::RequestId;
use crate::provider::error::ProviderErrorKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatusKind {
    Succeeded,
    Failed,
}

/// One provider's line in the output record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub provider: String,
    pub status: ProviderStatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreed_with_consensus: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ProviderErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub attempts: u32,
    pub latency_ms: u64,
}

impl ProviderStatus {
    pub fn is_success(&self) -> bool {
        self.status == ProviderStatusKind::Succeeded
    }
}

/// Everything a caller learns from one run.
///
/// Every enabled provider appears exactly once in `providers`, in configured
/// order. `answer` is empty when no consensus was possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub request_id: RequestId,
    pub answer: String,
    pub confidence: f64,
    pub strategy: StrategyKind,
    pub providers: Vec<ProviderStatus>,
    pub completed_at: DateTime<Utc>,
}

impl OutputRecord {
    pub fn has_answer(&self) -> bool {
        !self.answer.is_empty()
    }

    pub fn status(&self, provider: &str) -> Option<&ProviderStatus> {
        self.providers.iter().find(|s| s.provider == provider)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &ProviderStatus> {
        self.providers.iter().filter(|s| s.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ProviderStatus> {
        self.providers.iter().filter(|s| !s.is_success())
    }

    /// Single-line JSON, as appended to sinks
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
