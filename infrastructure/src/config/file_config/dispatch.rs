//! Dispatch configuration from TOML (`[dispatch]` section)

use llm_plus_application::DispatchParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw dispatch configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Per-prompt deadline in seconds, used when a prompt sets none
    pub deadline_seconds: u64,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        Self {
            deadline_seconds: DispatchParams::default().default_deadline.as_secs(),
        }
    }
}

impl FileDispatchConfig {
    pub fn to_params(&self) -> DispatchParams {
        DispatchParams::default().with_default_deadline(Duration::from_secs(self.deadline_seconds))
    }
}
