//! Consensus outcome of one run

use super::strategy::StrategyKind;
use crate::provider::response::ProviderFailure;
use serde::{Deserialize, Serialize};

/// Whether a provider's answer matched the chosen consensus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAgreement {
    pub provider: String,
    pub agreed: bool,
}

impl ProviderAgreement {
    pub fn new(provider: impl Into<String>, agreed: bool) -> Self {
        Self {
            provider: provider.into(),
            agreed,
        }
    }
}

/// Provider-independent consensus of one run.
///
/// `agreement` lists exactly the providers that produced a usable answer;
/// `failed` lists exactly the ones that did not. A result with no answer and
/// zero confidence is a valid outcome (no consensus possible), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub answer: Option<String>,
    pub strategy: StrategyKind,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub agreement: Vec<ProviderAgreement>,
    pub failed: Vec<ProviderFailure>,
}

impl ConsensusResult {
    /// The terminal result when no provider produced a usable answer
    pub fn no_consensus(strategy: StrategyKind, failed: Vec<ProviderFailure>) -> Self {
        Self {
            answer: None,
            strategy,
            confidence: 0.0,
            agreement: Vec::new(),
            failed,
        }
    }

    pub fn has_answer(&self) -> bool {
        self.answer.is_some()
    }

    /// Providers whose answer matched the consensus
    pub fn agreed_providers(&self) -> impl Iterator<Item = &str> {
        self.agreement
            .iter()
            .filter(|a| a.agreed)
            .map(|a| a.provider.as_str())
    }

    /// Providers that answered but disagreed with the consensus
    pub fn dissenting_providers(&self) -> impl Iterator<Item = &str> {
        self.agreement
            .iter()
            .filter(|a| !a.agreed)
            .map(|a| a.provider.as_str())
    }

    /// Agreement flag for one provider, `None` if it did not answer
    pub fn agreed_with(&self, provider: &str) -> Option<bool> {
        self.agreement
            .iter()
            .find(|a| a.provider == provider)
            .map(|a| a.agreed)
    }

    /// Visual agreement summary (e.g., "[●●○]")
    pub fn agreement_summary(&self) -> String {
        let mut summary = String::from("[");
        for entry in &self.agreement {
            summary.push(if entry.agreed { '●' } else { '○' });
        }
        for _ in &self.failed {
            summary.push('×');
        }
        summary.push(']');
        summary
    }
}
