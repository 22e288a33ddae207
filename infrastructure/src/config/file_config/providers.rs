//! Provider list from TOML (`[[providers]]` tables)

use llm_plus_domain::{BackoffPolicy, DomainError, ProviderKind, ProviderSpec};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One `[[providers]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Unique provider name used in results
    pub name: String,
    /// Backend model identifier
    pub model: String,
    /// Backend: "openai", "anthropic", "gemini" or "debug" (inferred from model when absent)
    pub kind: Option<String>,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
    pub enabled: bool,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        let spec = ProviderSpec::new("", "");
        Self {
            name: String::new(),
            model: String::new(),
            kind: None,
            timeout_seconds: spec.timeout.as_secs(),
            max_retries: spec.max_retries,
            backoff_base_ms: spec.backoff.base_delay.as_millis() as u64,
            backoff_max_ms: spec.backoff.max_delay.as_millis() as u64,
            enabled: true,
        }
    }
}

impl FileProviderConfig {
    /// Convert to a validated domain spec
    pub fn to_spec(&self) -> Result<ProviderSpec, DomainError> {
        let mut spec = ProviderSpec::new(self.name.trim(), self.model.trim())
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_max_retries(self.max_retries)
            .with_backoff(BackoffPolicy::new(
                Duration::from_millis(self.backoff_base_ms),
                Duration::from_millis(self.backoff_max_ms),
            ));
        if let Some(kind) = &self.kind {
            spec = spec.with_kind(kind.parse::<ProviderKind>()?);
        }
        if !self.enabled {
            spec = spec.disabled();
        }
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain() {
        let entry = FileProviderConfig {
            name: "claude".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            ..Default::default()
        };
        let spec = entry.to_spec().unwrap();
        assert_eq!(spec, ProviderSpec::new("claude", "claude-3-5-sonnet-latest"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let entry = FileProviderConfig {
            name: "x".to_string(),
            model: "x-1".to_string(),
            kind: Some("bedrock".to_string()),
            ..Default::default()
        };
        assert_eq!(
            entry.to_spec(),
            Err(DomainError::UnknownProviderKind("bedrock".to_string()))
        );
    }
}
