//! Vote weighted by per-provider historical accuracy

use super::majority::score_then_priority;
use super::priority::ProviderPriority;
use super::strategy::{AggregationStrategy, Selection, StrategyKind, group_by_key};
use crate::answer::unit::AnswerUnit;
use std::collections::HashMap;

/// Weight of a provider missing from the table
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Groups answers by comparison key and sums each member's configured
/// weight. The heaviest group wins; ties go to priority order.
#[derive(Debug, Clone, Default)]
pub struct WeightedVote {
    weights: HashMap<String, f64>,
}

impl WeightedVote {
    pub fn new(weights: HashMap<String, f64>) -> Self {
        Self { weights }
    }

    /// Configured weight, clamped to be non-negative
    pub fn weight_of(&self, provider: &str) -> f64 {
        self.weights
            .get(provider)
            .copied()
            .filter(|w| w.is_finite())
            .unwrap_or(DEFAULT_WEIGHT)
            .max(0.0)
    }
}

impl AggregationStrategy for WeightedVote {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Weighted
    }

    fn select(&self, units: &[AnswerUnit], priority: &ProviderPriority) -> Selection {
        let groups = group_by_key(units);
        let total: f64 = units.iter().map(|u| self.weight_of(&u.provider)).sum();

        let scored = groups.iter().map(|group| {
            let weight: f64 = group
                .members
                .iter()
                .map(|u| self.weight_of(&u.provider))
                .sum();
            (weight, group)
        });

        let winner = scored.min_by(|(wa, ga), (wb, gb)| {
            score_then_priority((*wa, ga.best_rank(priority)), (*wb, gb.best_rank(priority)))
        });

        match winner.and_then(|(weight, group)| Some((weight, group, group.representative()?))) {
            Some((weight, group, representative)) => Selection {
                answer: representative.answer().to_string(),
                confidence: if total > 0.0 { weight / total } else { 0.0 },
                agreeing: group.providers(),
            },
            None => Selection {
                answer: String::new(),
                confidence: 0.0,
                agreeing: Vec::new(),
            },
        }
    }
}
