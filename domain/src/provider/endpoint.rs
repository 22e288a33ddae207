//! Endpoint configuration types (provider-neutral, serde-free).
//!
//! These types define how to reach each HTTP backend without depending on
//! any serialization format (TOML, JSON, etc.).

/// Connection settings for one HTTP backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSettings {
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Direct API key; the environment variable is preferred.
    pub api_key: Option<String>,
    /// Base URL of the API.
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl EndpointSettings {
    fn new(api_key_env: &str, base_url: &str) -> Self {
        Self {
            api_key_env: api_key_env.to_string(),
            api_key: None,
            base_url: base_url.to_string(),
            max_tokens: 4096,
        }
    }

    /// Resolve the API key: the direct value wins, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Settings for every supported HTTP backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub openai: EndpointSettings,
    pub anthropic: EndpointSettings,
    pub gemini: EndpointSettings,
    /// Anthropic API version header.
    pub anthropic_version: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            openai: EndpointSettings::new("OPENAI_API_KEY", "https://api.openai.com"),
            anthropic: EndpointSettings::new("ANTHROPIC_API_KEY", "https://api.anthropic.com"),
            gemini: EndpointSettings::new(
                "GEMINI_API_KEY",
                "https://generativelanguage.googleapis.com",
            ),
            anthropic_version: "2023-06-01".to_string(),
        }
    }
}
