//! Pick the provider whose answer extraction was cleanest

use super::priority::ProviderPriority;
use super::strategy::{AggregationStrategy, Selection, StrategyKind};
use crate::answer::unit::AnswerUnit;

/// Chooses the first provider (in priority order) with an exact extraction,
/// falling back to the highest-priority provider when all were heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestConfidence;

impl AggregationStrategy for HighestConfidence {
    fn kind(&self) -> StrategyKind {
        StrategyKind::HighestConfidence
    }

    fn select(&self, units: &[AnswerUnit], priority: &ProviderPriority) -> Selection {
        let mut ordered: Vec<&AnswerUnit> = units.iter().collect();
        ordered.sort_by(|a, b| priority.sort_key(&a.provider).cmp(&priority.sort_key(&b.provider)));

        let Some(chosen) = ordered
            .iter()
            .find(|u| u.normalization.is_exact())
            .or_else(|| ordered.first())
            .copied()
        else {
            return Selection {
                answer: String::new(),
                confidence: 0.0,
                agreeing: Vec::new(),
            };
        };

        let agreeing: Vec<String> = units
            .iter()
            .filter(|u| u.comparison_key == chosen.comparison_key)
            .map(|u| u.provider.clone())
            .collect();

        Selection {
            answer: chosen.answer().to_string(),
            confidence: agreeing.len() as f64 / units.len() as f64,
            agreeing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::unit::NormalizationConfidence::{Exact, Heuristic};
    use crate::consensus::strategy::test_support::short;

    fn priority() -> ProviderPriority {
        ProviderPriority::new(["gpt", "claude", "gemini"])
    }

    #[test]
    fn test_prefers_exact_extraction() {
        let units = vec![
            short("gpt", "Lyon", Heuristic),
            short("claude", "Paris", Exact),
            short("gemini", "Paris", Heuristic),
        ];
        let result = HighestConfidence.aggregate(&units, &[], &priority());
        assert_eq!(result.answer.as_deref(), Some("Paris"));
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.agreed_with("gpt"), Some(false));
        assert_eq!(result.agreed_with("gemini"), Some(true));
    }

    #[test]
    fn test_all_heuristic_uses_priority() {
        let units = vec![
            short("gemini", "3", Heuristic),
            short("claude", "4", Heuristic),
        ];
        let result = HighestConfidence.aggregate(&units, &[], &priority());
        assert_eq!(result.answer.as_deref(), Some("4"));
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_first_exact_in_priority_order() {
        let units = vec![
            short("gemini", "blue", Exact),
            short("gpt", "red", Exact),
        ];
        let result = HighestConfidence.aggregate(&units, &[], &priority());
        assert_eq!(result.answer.as_deref(), Some("red"));
        assert_eq!(result.agreement[0].provider, "gpt");
    }
}
