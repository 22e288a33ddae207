//! Offline adapter that answers without calling any backend

use async_trait::async_trait;
use llm_plus_application::ProviderAdapter;
use llm_plus_domain::core::string::truncate_chars;
use llm_plus_domain::{Prompt, ProviderError, ProviderKind};

/// Length of the prompt excerpt echoed back
const ECHO_CHARS: usize = 50;

/// Simulates a provider for dry runs: the answer names the model family and
/// echoes the first 50 characters of the prompt, always followed by `...`.
pub struct DebugAdapter {
    name: String,
    family: &'static str,
}

impl DebugAdapter {
    /// `model` only selects the family label (GPT, CLAUDE, GEMINI, DEBUG)
    pub fn new(name: impl Into<String>, model: &str) -> Self {
        let family = ProviderKind::infer(model)
            .unwrap_or(ProviderKind::Debug)
            .family_label();
        Self {
            name: name.into(),
            family,
        }
    }
}

#[async_trait]
impl ProviderAdapter for DebugAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        Ok(format!(
            "[DEBUG] {} response to: {}...",
            self.family,
            truncate_chars(prompt.text(), ECHO_CHARS)
        ))
    }
}
