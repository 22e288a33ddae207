//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Consensus plus every provider's status and answer
    Full,
    /// Only the consensus answer with its confidence (default)
    #[default]
    Answer,
    /// The output record as pretty-printed JSON
    Json,
}
