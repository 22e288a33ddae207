//! Consensus configuration from TOML (`[consensus]` section)

use llm_plus_domain::{DomainError, StrategyKind, TaskHint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw consensus configuration from TOML
///
/// Enum-valued fields are kept as strings so that validation can report
/// unknown values instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// "majority" | "highest-confidence" | "weighted"
    pub strategy: String,
    /// "free-text" | "short-answer"
    pub task_hint: String,
    /// Per-provider weights for the weighted strategy (default 1.0)
    pub weights: HashMap<String, f64>,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default().as_str().to_string(),
            task_hint: TaskHint::default().as_str().to_string(),
            weights: HashMap::new(),
        }
    }
}

impl FileConsensusConfig {
    pub fn strategy(&self) -> Result<StrategyKind, DomainError> {
        self.strategy.parse()
    }

    pub fn task_hint(&self) -> Result<TaskHint, DomainError> {
        self.task_hint.parse()
    }
}
