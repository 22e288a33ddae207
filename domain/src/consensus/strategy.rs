//! Pluggable aggregation strategies

use super::highest_confidence::HighestConfidence;
use super::majority::MajorityVote;
use super::priority::ProviderPriority;
use super::result::{ConsensusResult, ProviderAgreement};
use super::weighted::WeightedVote;
use crate::answer::unit::AnswerUnit;
use crate::core::error::DomainError;
use crate::provider::response::ProviderFailure;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Confidence reported when only one provider answered (unverified)
pub const SINGLE_SOURCE_CONFIDENCE: f64 = 0.34;

/// A strategy's choice among two or more answers
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub answer: String,
    pub confidence: f64,
    /// Providers counted as agreeing with `answer`
    pub agreeing: Vec<String>,
}

/// Answers sharing one comparison key
#[derive(Debug, Clone)]
pub struct AnswerGroup<'a> {
    pub key: &'a str,
    pub members: Vec<&'a AnswerUnit>,
}

impl<'a> AnswerGroup<'a> {
    pub fn weight(&self) -> usize {
        self.members.len()
    }

    /// Best (lowest) priority key among the members
    pub fn best_rank(&self, priority: &ProviderPriority) -> (usize, &'a str) {
        self.members
            .iter()
            .map(|u| priority.sort_key(u.provider.as_str()))
            .min()
            .unwrap_or((usize::MAX, ""))
    }

    /// The member whose provider name sorts first; its text represents the group
    pub fn representative(&self) -> Option<&'a AnswerUnit> {
        self.members.iter().copied().min_by(|a, b| a.provider.cmp(&b.provider))
    }

    pub fn providers(&self) -> Vec<String> {
        self.members.iter().map(|u| u.provider.clone()).collect()
    }
}

/// Group answers by comparison key, preserving first-seen order
pub fn group_by_key(units: &[AnswerUnit]) -> Vec<AnswerGroup<'_>> {
    let mut groups: Vec<AnswerGroup<'_>> = Vec::new();
    for unit in units {
        match groups.iter_mut().find(|g| g.key == unit.comparison_key) {
            Some(group) => group.members.push(unit),
            None => groups.push(AnswerGroup {
                key: &unit.comparison_key,
                members: vec![unit],
            }),
        }
    }
    groups
}

/// An interchangeable way of resolving disagreement into one answer.
///
/// Implementors only decide among two or more answers in [`select`];
/// [`aggregate`] handles the zero- and single-answer cases identically for
/// every strategy and builds the agreement report.
///
/// [`select`]: AggregationStrategy::select
/// [`aggregate`]: AggregationStrategy::aggregate
pub trait AggregationStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Choose among `units` (always at least two)
    fn select(&self, units: &[AnswerUnit], priority: &ProviderPriority) -> Selection;

    fn aggregate(
        &self,
        units: &[AnswerUnit],
        failures: &[ProviderFailure],
        priority: &ProviderPriority,
    ) -> ConsensusResult {
        let mut failed = failures.to_vec();
        failed.sort_by(|a, b| priority.sort_key(&a.provider).cmp(&priority.sort_key(&b.provider)));

        let (answer, confidence, agreeing) = match units {
            [] => return ConsensusResult::no_consensus(self.kind(), failed),
            [only] => (
                only.answer().to_string(),
                SINGLE_SOURCE_CONFIDENCE,
                vec![only.provider.clone()],
            ),
            _ => {
                let selection = self.select(units, priority);
                (
                    selection.answer,
                    selection.confidence.clamp(0.0, 1.0),
                    selection.agreeing,
                )
            }
        };

        let mut ordered: Vec<&AnswerUnit> = units.iter().collect();
        ordered.sort_by(|a, b| priority.sort_key(&a.provider).cmp(&priority.sort_key(&b.provider)));
        let agreement = ordered
            .into_iter()
            .map(|u| ProviderAgreement::new(u.provider.clone(), agreeing.contains(&u.provider)))
            .collect();

        ConsensusResult {
            answer: Some(answer),
            strategy: self.kind(),
            confidence,
            agreement,
            failed,
        }
    }
}

/// Configured name of an aggregation strategy
///
/// # Example
///
/// ```
/// use llm_plus_domain::consensus::StrategyKind;
///
/// assert_eq!("majority".parse::<StrategyKind>().ok(), Some(StrategyKind::Majority));
/// assert_eq!(StrategyKind::default(), StrategyKind::Majority);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Exact-match majority vote with similarity fallback
    #[default]
    Majority,
    /// Single provider with the cleanest extraction
    HighestConfidence,
    /// Vote weighted by per-provider historical accuracy
    Weighted,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Majority => "majority",
            StrategyKind::HighestConfidence => "highest-confidence",
            StrategyKind::Weighted => "weighted",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::Majority => "exact-match majority vote with similarity fallback",
            StrategyKind::HighestConfidence => "highest-confidence single provider",
            StrategyKind::Weighted => "vote weighted by historical accuracy",
        }
    }

    /// Instantiate the strategy. `weights` is only read by [`StrategyKind::Weighted`].
    pub fn build(self, weights: &HashMap<String, f64>) -> Box<dyn AggregationStrategy> {
        match self {
            StrategyKind::Majority => Box::new(MajorityVote),
            StrategyKind::HighestConfidence => Box::new(HighestConfidence),
            StrategyKind::Weighted => Box::new(WeightedVote::new(weights.clone())),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "majority" | "majority-vote" => Ok(StrategyKind::Majority),
            "highest-confidence" | "highest" | "single" => Ok(StrategyKind::HighestConfidence),
            "weighted" | "weighted-accuracy" => Ok(StrategyKind::Weighted),
            _ => Err(DomainError::UnknownStrategy(s.to_string())),
        }
    }
}
