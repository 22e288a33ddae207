//! Backend family of a provider

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which backend serves a provider.
///
/// When a provider spec does not name its kind explicitly, it is inferred
/// from the model string prefix (`gpt-4o` → OpenAI, `claude-…` → Anthropic,
/// `gemini-…` → Gemini).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    /// Offline provider that simulates answers without network access
    Debug,
}

impl ProviderKind {
    /// Infer the backend from a model string
    pub fn infer(model: &str) -> Option<Self> {
        let model = model.trim().to_lowercase();
        if model.starts_with("gpt") || model.starts_with("o1") || model.starts_with("o3") {
            Some(ProviderKind::OpenAi)
        } else if model.starts_with("claude") {
            Some(ProviderKind::Anthropic)
        } else if model.starts_with("gemini") {
            Some(ProviderKind::Gemini)
        } else if model.starts_with("debug") {
            Some(ProviderKind::Debug)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Debug => "debug",
        }
    }

    /// Generic family label, e.g. "GPT" for every OpenAI model
    pub fn family_label(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "GPT",
            ProviderKind::Anthropic => "CLAUDE",
            ProviderKind::Gemini => "GEMINI",
            ProviderKind::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "debug" => Ok(ProviderKind::Debug),
            _ => Err(DomainError::UnknownProviderKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_model_prefix() {
        assert_eq!(ProviderKind::infer("gpt-4o"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::infer("o3-mini"), Some(ProviderKind::OpenAi));
        assert_eq!(
            ProviderKind::infer("claude-3-5-sonnet-latest"),
            Some(ProviderKind::Anthropic)
        );
        assert_eq!(ProviderKind::infer("Gemini-1.5-Pro"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::infer("llama-3"), None);
    }

    #[test]
    fn test_parse_with_aliases() {
        assert_eq!("claude".parse::<ProviderKind>(), Ok(ProviderKind::Anthropic));
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!("google".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_family_label() {
        assert_eq!(ProviderKind::OpenAi.family_label(), "GPT");
        assert_eq!(ProviderKind::Anthropic.family_label(), "CLAUDE");
    }
}
