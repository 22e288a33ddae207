//! Builds provider handles from configuration
//!
//! Routing is by backend kind: an explicit `kind` on the provider wins, otherwise
//! the kind is inferred from the model string.

use super::anthropic::AnthropicAdapter;
use super::debug::DebugAdapter;
use super::gemini::GeminiAdapter;
use super::http::build_client;
use super::openai::OpenAiAdapter;
use llm_plus_application::{ProviderAdapter, ProviderHandle};
use llm_plus_domain::{DomainError, EndpointConfig, ProviderKind, ProviderSpec};
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Creates one adapter per provider spec.
pub struct ProviderRegistry {
    endpoints: EndpointConfig,
    client: Client,
    debug_providers: bool,
}

impl ProviderRegistry {
    pub fn new(endpoints: EndpointConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            endpoints,
            client: build_client()?,
            debug_providers: false,
        })
    }

    /// Replace every backend with the offline debug adapter
    pub fn with_debug_providers(mut self, enabled: bool) -> Self {
        self.debug_providers = enabled;
        self
    }

    pub fn adapter_for(&self, spec: &ProviderSpec) -> Result<Arc<dyn ProviderAdapter>, RegistryError> {
        let kind = if self.debug_providers {
            ProviderKind::Debug
        } else {
            spec.resolved_kind().ok_or_else(|| {
                DomainError::InvalidProviderSpec(format!(
                    "{}: cannot infer backend for model '{}', set kind explicitly",
                    spec.name, spec.model
                ))
            })?
        };
        debug!(provider = %spec.name, model = %spec.model, kind = %kind, "Building adapter");

        let client = self.client.clone();
        let adapter: Arc<dyn ProviderAdapter> = match kind {
            ProviderKind::OpenAi => Arc::new(OpenAiAdapter::new(
                client,
                &spec.name,
                &spec.model,
                self.endpoints.openai.clone(),
            )),
            ProviderKind::Anthropic => Arc::new(AnthropicAdapter::new(
                client,
                &spec.name,
                &spec.model,
                self.endpoints.anthropic.clone(),
                &self.endpoints.anthropic_version,
            )),
            ProviderKind::Gemini => Arc::new(GeminiAdapter::new(
                client,
                &spec.name,
                &spec.model,
                self.endpoints.gemini.clone(),
            )),
            ProviderKind::Debug => Arc::new(DebugAdapter::new(&spec.name, &spec.model)),
        };
        Ok(adapter)
    }

    /// Build handles for `specs`, preserving their order
    pub fn build(&self, specs: Vec<ProviderSpec>) -> Result<Vec<ProviderHandle>, RegistryError> {
        specs
            .into_iter()
            .map(|spec| {
                let adapter = self.adapter_for(&spec)?;
                Ok(ProviderHandle::new(spec, adapter))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_plus_domain::Prompt;

    #[test]
    fn test_build_preserves_order() {
        let registry = ProviderRegistry::new(EndpointConfig::default()).unwrap();
        let handles = registry.build(ProviderSpec::defaults()).unwrap();
        let names: Vec<_> = handles.iter().map(|h| h.name().to_string()).collect();
        let expected: Vec<_> = ProviderSpec::defaults().into_iter().map(|s| s.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_unknown_model_without_kind_rejected() {
        let registry = ProviderRegistry::new(EndpointConfig::default()).unwrap();
        let result = registry.adapter_for(&ProviderSpec::new("local", "llama-3"));
        assert!(matches!(result, Err(RegistryError::Domain(_))));
    }

    #[tokio::test]
    async fn test_debug_providers_answer_offline() {
        let registry = ProviderRegistry::new(EndpointConfig::default())
            .unwrap()
            .with_debug_providers(true);
        let adapter = registry
            .adapter_for(&ProviderSpec::new("local", "llama-3"))
            .unwrap();
        let text = adapter.generate(&Prompt::new("ping").unwrap()).await.unwrap();
        assert_eq!(text, "[DEBUG] DEBUG response to: ping...");
    }
}
