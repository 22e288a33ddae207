//! Normalized per-provider answer

use serde::{Deserialize, Serialize};

/// How cleanly a short answer could be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationConfidence {
    /// An explicit answer marker was found, or no extraction was needed
    Exact,
    /// The answer was guessed (final line or whole text)
    Heuristic,
}

impl NormalizationConfidence {
    pub fn is_exact(&self) -> bool {
        matches!(self, NormalizationConfidence::Exact)
    }
}

/// One provider's answer after normalization.
///
/// Built once by the [`Normalizer`](super::Normalizer) and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerUnit {
    pub provider: String,
    /// Text exactly as the provider returned it
    pub raw_text: String,
    /// Cleaned text with the original casing, used for display
    pub canonical_text: String,
    /// Lower-cased, whitespace-collapsed key used for exact-match voting
    pub comparison_key: String,
    /// Extracted short-form answer, when the task asks for one
    pub short_answer: Option<String>,
    pub normalization: NormalizationConfidence,
    pub attempts: u32,
    pub latency_ms: u64,
}

impl AnswerUnit {
    /// The answer this provider votes for: the short answer when extracted,
    /// otherwise the canonical text.
    pub fn answer(&self) -> &str {
        self.short_answer.as_deref().unwrap_or(&self.canonical_text)
    }
}
