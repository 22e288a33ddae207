//! Provider adapter port
//!
//! Defines the single capability every external answer provider exposes.

use async_trait::async_trait;
use llm_plus_domain::{Prompt, ProviderError, RawResponse};
use std::time::Instant;

/// Uniform interface over one external provider.
///
/// Implementations (adapters) live in the infrastructure layer and map every
/// backend-specific failure into [`ProviderError`]. Retries, backoff and
/// deadlines are not the adapter's concern; the dispatch layer owns them.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider name, as used in output records
    fn name(&self) -> &str;

    /// Send the prompt once and return the answer text
    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError>;

    /// One timed attempt.
    ///
    /// A blank answer is reported as [`ProviderError::InvalidResponse`].
    async fn call(&self, prompt: &Prompt) -> RawResponse {
        let started = Instant::now();
        let outcome = match self.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => {
                Err(ProviderError::invalid_response("empty answer"))
            }
            other => other,
        };
        RawResponse {
            provider: self.name().to_string(),
            outcome,
            latency: started.elapsed(),
            attempts: 1,
        }
    }
}
