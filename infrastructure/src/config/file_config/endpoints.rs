//! HTTP endpoint configuration from TOML (`[endpoints.*]` sections)

use llm_plus_domain::{EndpointConfig, EndpointSettings};
use serde::{Deserialize, Serialize};

/// Overrides for one backend; unset fields keep the built-in value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Environment variable name for the API key
    pub api_key_env: Option<String>,
    /// Direct API key; the environment variable is preferred
    pub api_key: Option<String>,
    /// Base URL (point at a proxy or compatible server)
    pub base_url: Option<String>,
    /// Max tokens per response
    pub max_tokens: Option<u32>,
}

impl FileEndpointConfig {
    fn apply(&self, settings: &mut EndpointSettings) {
        if let Some(env) = &self.api_key_env {
            settings.api_key_env = env.clone();
        }
        if self.api_key.is_some() {
            settings.api_key = self.api_key.clone();
        }
        if let Some(url) = &self.base_url {
            settings.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.max_tokens = max_tokens;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointsConfig {
    pub openai: FileEndpointConfig,
    pub anthropic: FileEndpointConfig,
    pub gemini: FileEndpointConfig,
    /// Anthropic API version header
    pub anthropic_version: Option<String>,
}

impl FileEndpointsConfig {
    pub fn to_endpoint_config(&self) -> EndpointConfig {
        let mut config = EndpointConfig::default();
        self.openai.apply(&mut config.openai);
        self.anthropic.apply(&mut config.anthropic);
        self.gemini.apply(&mut config.gemini);
        if let Some(version) = &self.anthropic_version {
            config.anthropic_version = version.clone();
        }
        config
    }
}
