//! Dispatch parameters

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fallback deadline applied when a prompt carries none
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(120);

/// Static parameters of the dispatch coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchParams {
    /// Deadline for the whole fan-out when the prompt sets none
    pub default_deadline: Duration,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            default_deadline: DEFAULT_DEADLINE,
        }
    }
}

impl DispatchParams {
    pub fn with_default_deadline(mut self, deadline: Duration) -> Self {
        self.default_deadline = deadline;
        self
    }
}
