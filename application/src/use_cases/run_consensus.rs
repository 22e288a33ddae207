//! Run Consensus use case
//!
//! Dispatches one prompt to every enabled provider, normalizes the answers,
//! aggregates them into a consensus and assembles the output record.

use crate::config::ConsensusParams;
use crate::dispatch::DispatchCoordinator;
use crate::ports::progress::{DispatchProgress, NoProgress};
use crate::ports::result_sink::{ResultSink, SinkError};
use chrono::Utc;
use llm_plus_domain::{
    ConsistencyError, Normalizer, OutputRecord, Prompt, ProviderPriority, assemble,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a run.
///
/// Provider failures are not among them: they are recorded in the output.
#[derive(Error, Debug)]
pub enum RunConsensusError {
    #[error("No providers enabled")]
    NoProviders,

    #[error("Inconsistent result: {0}")]
    Consistency(#[from] ConsistencyError),

    #[error("Failed to publish result: {0}")]
    Sink(#[from] SinkError),
}

/// Use case for answering one prompt by provider consensus
pub struct RunConsensusUseCase {
    coordinator: DispatchCoordinator,
    params: ConsensusParams,
    sink: Option<Arc<dyn ResultSink>>,
}

impl RunConsensusUseCase {
    pub fn new(coordinator: DispatchCoordinator, params: ConsensusParams) -> Self {
        Self {
            coordinator,
            params,
            sink: None,
        }
    }

    /// Publish every finished record to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, prompt: Prompt) -> Result<OutputRecord, RunConsensusError> {
        self.execute_with_progress(prompt, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        prompt: Prompt,
        progress: &dyn DispatchProgress,
    ) -> Result<OutputRecord, RunConsensusError> {
        if self.coordinator.is_empty() {
            return Err(RunConsensusError::NoProviders);
        }
        let enabled = self.coordinator.provider_names();

        let responses = self.coordinator.dispatch(&prompt, progress).await;

        let normalized = Normalizer::new(prompt.task_hint()).normalize_all(&responses);
        let priority = ProviderPriority::new(enabled.iter().cloned());
        let strategy = self.params.build_strategy();
        let consensus = strategy.aggregate(&normalized.units, &normalized.failures, &priority);

        if consensus.has_answer() {
            info!(
                request_id = %prompt.request_id(),
                strategy = %consensus.strategy,
                confidence = consensus.confidence,
                agreement = %consensus.agreement_summary(),
                "Consensus reached"
            );
        } else {
            warn!(
                request_id = %prompt.request_id(),
                failed = consensus.failed.len(),
                "No provider produced a usable answer"
            );
        }

        let record = assemble(
            prompt.request_id(),
            &consensus,
            &normalized.units,
            &normalized.failures,
            &enabled,
            Utc::now(),
        )?;

        if let Some(sink) = &self.sink {
            sink.publish(&record).await?;
        }

        Ok(record)
    }
}
