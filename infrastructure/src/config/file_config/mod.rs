//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and application
//! types after validation.

mod consensus;
mod dispatch;
mod endpoints;
mod output;
mod providers;

pub use consensus::FileConsensusConfig;
pub use dispatch::FileDispatchConfig;
pub use endpoints::{FileEndpointConfig, FileEndpointsConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::FileProviderConfig;

use llm_plus_application::{ConsensusParams, DispatchParams};
use llm_plus_domain::{DomainError, EndpointConfig, ProviderSpec, TaskHint};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("duplicate provider name '{0}'")]
    DuplicateProvider(String),

    #[error("dispatch.deadline_seconds cannot be 0")]
    InvalidDeadline,

    #[error("consensus weight for '{provider}' must be finite and non-negative, got {weight}")]
    InvalidWeight { provider: String, weight: f64 },

    #[error("no providers enabled")]
    NoProvidersEnabled,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Fan-out settings
    pub dispatch: FileDispatchConfig,
    /// Aggregation settings
    pub consensus: FileConsensusConfig,
    /// Provider list; the built-in trio is used when empty
    pub providers: Vec<FileProviderConfig>,
    /// HTTP backend connection settings
    pub endpoints: FileEndpointsConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every detected problem.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.dispatch.deadline_seconds == 0 {
            issues.push(ConfigValidationError::InvalidDeadline);
        }
        if let Err(e) = self.consensus.strategy() {
            issues.push(e.into());
        }
        if let Err(e) = self.consensus.task_hint() {
            issues.push(e.into());
        }
        for (provider, weight) in &self.consensus.weights {
            if !weight.is_finite() || *weight < 0.0 {
                issues.push(ConfigValidationError::InvalidWeight {
                    provider: provider.clone(),
                    weight: *weight,
                });
            }
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider.name.trim()) {
                issues.push(ConfigValidationError::DuplicateProvider(
                    provider.name.clone(),
                ));
            }
            if let Err(e) = provider.to_spec() {
                issues.push(e.into());
            }
        }
        if !self.providers.is_empty() && self.providers.iter().all(|p| !p.enabled) {
            issues.push(ConfigValidationError::NoProvidersEnabled);
        }

        issues
    }

    /// Configured providers, or the built-in defaults when none are listed
    pub fn provider_specs(&self) -> Result<Vec<ProviderSpec>, ConfigValidationError> {
        if self.providers.is_empty() {
            return Ok(ProviderSpec::defaults());
        }
        self.providers
            .iter()
            .map(|p| p.to_spec().map_err(ConfigValidationError::from))
            .collect()
    }

    pub fn endpoint_config(&self) -> EndpointConfig {
        self.endpoints.to_endpoint_config()
    }

    pub fn dispatch_params(&self) -> DispatchParams {
        self.dispatch.to_params()
    }

    pub fn consensus_params(&self) -> Result<ConsensusParams, ConfigValidationError> {
        Ok(ConsensusParams {
            strategy: self.consensus.strategy()?,
            weights: self.consensus.weights.clone(),
        })
    }

    pub fn task_hint(&self) -> Result<TaskHint, ConfigValidationError> {
        Ok(self.consensus.task_hint()?)
    }
}
