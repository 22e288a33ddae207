//! Consensus parameters

use llm_plus_domain::{AggregationStrategy, StrategyKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which aggregation strategy runs and with which provider weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub strategy: StrategyKind,
    /// Historical-accuracy weight per provider name (weighted strategy only)
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

impl ConsensusParams {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_weight(mut self, provider: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(provider.into(), weight);
        self
    }

    /// Instantiate the configured strategy
    pub fn build_strategy(&self) -> Box<dyn AggregationStrategy> {
        self.strategy.build(&self.weights)
    }
}
