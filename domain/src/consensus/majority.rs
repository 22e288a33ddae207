//! Exact-match majority vote with similarity fallback

use super::priority::ProviderPriority;
use super::similarity::token_overlap;
use super::strategy::{AggregationStrategy, AnswerGroup, Selection, StrategyKind, group_by_key};
use crate::answer::unit::AnswerUnit;
use std::cmp::Ordering;

/// Upper bound for confidence reached without any exact match
pub const SIMILARITY_CONFIDENCE_CAP: f64 = 0.99;

/// Minimum token overlap with the similarity winner to count as agreeing
pub const SIMILARITY_AGREEMENT_THRESHOLD: f64 = 0.5;

/// Default strategy.
///
/// Units are grouped by comparison key and the largest group wins. Ties are
/// broken by provider priority. When every answer is distinct, the answer with
/// the highest average token overlap against all others is chosen instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVote;

impl MajorityVote {
    fn by_group(
        groups: &[AnswerGroup<'_>],
        total: usize,
        priority: &ProviderPriority,
    ) -> Option<Selection> {
        let winner = groups.iter().min_by(|a, b| {
            b.weight()
                .cmp(&a.weight())
                .then_with(|| a.best_rank(priority).cmp(&b.best_rank(priority)))
        })?;
        let representative = winner.representative()?;

        Some(Selection {
            answer: representative.answer().to_string(),
            confidence: winner.weight() as f64 / total as f64,
            agreeing: winner.providers(),
        })
    }

    fn by_similarity(units: &[AnswerUnit], priority: &ProviderPriority) -> Option<Selection> {
        let averages: Vec<f64> = units
            .iter()
            .enumerate()
            .map(|(i, unit)| {
                let sum: f64 = units
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| token_overlap(&unit.comparison_key, &other.comparison_key))
                    .sum();
                sum / (units.len() - 1) as f64
            })
            .collect();

        let (winner_idx, average) = averages
            .iter()
            .copied()
            .enumerate()
            .min_by(|(i, a), (j, b)| {
                score_then_priority(
                    (*a, priority.sort_key(&units[*i].provider)),
                    (*b, priority.sort_key(&units[*j].provider)),
                )
            })?;
        let winner = &units[winner_idx];

        let agreeing = units
            .iter()
            .filter(|u| {
                u.provider == winner.provider
                    || token_overlap(&u.comparison_key, &winner.comparison_key)
                        >= SIMILARITY_AGREEMENT_THRESHOLD
            })
            .map(|u| u.provider.clone())
            .collect();

        Some(Selection {
            answer: winner.answer().to_string(),
            confidence: average.min(SIMILARITY_CONFIDENCE_CAP),
            agreeing,
        })
    }
}

impl AggregationStrategy for MajorityVote {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Majority
    }

    fn select(&self, units: &[AnswerUnit], priority: &ProviderPriority) -> Selection {
        let groups = group_by_key(units);
        let all_distinct = groups.iter().all(|g| g.weight() == 1);

        let selection = if all_distinct && units.len() >= 2 {
            Self::by_similarity(units, priority)
        } else {
            Self::by_group(&groups, units.len(), priority)
        };

        selection.unwrap_or_else(|| Selection {
            answer: String::new(),
            confidence: 0.0,
            agreeing: Vec::new(),
        })
    }
}

/// Order used when comparing f64 scores with a priority tie-break
pub(crate) fn score_then_priority(
    a: (f64, (usize, &str)),
    b: (f64, (usize, &str)),
) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::strategy::test_support::unit;

    fn priority() -> ProviderPriority {
        ProviderPriority::new(["gpt", "claude", "gemini"])
    }

    #[test]
    fn test_paris_paris_london() {
        let units = vec![
            unit("gpt", "Paris"),
            unit("claude", "paris"),
            unit("gemini", "London"),
        ];
        let result = MajorityVote.aggregate(&units, &[], &priority());

        assert_eq!(result.answer.as_deref(), Some("paris"));
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.agreed_with("gpt"), Some(true));
        assert_eq!(result.agreed_with("claude"), Some(true));
        assert_eq!(result.agreed_with("gemini"), Some(false));
    }

    #[test]
    fn test_identical_answers_full_confidence() {
        let units = vec![
            unit("gpt", "42"),
            unit("claude", "42"),
            unit("gemini", "42"),
        ];
        let result = MajorityVote.aggregate(&units, &[], &priority());
        assert_eq!(result.answer.as_deref(), Some("42"));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.dissenting_providers().count(), 0);
    }

    #[test]
    fn test_tie_broken_by_priority_not_input_order() {
        let forward = vec![
            unit("gemini", "blue"),
            unit("gpt", "red"),
            unit("claude", "blue"),
            unit("llama", "red"),
        ];
        let priority = ProviderPriority::new(["gpt", "claude", "gemini", "llama"]);
        let result = MajorityVote.aggregate(&forward, &[], &priority);
        assert_eq!(result.answer.as_deref(), Some("red"));
        assert_eq!(result.confidence, 0.5);

        let mut reversed = forward.clone();
        reversed.reverse();
        let again = MajorityVote.aggregate(&reversed, &[], &priority);
        assert_eq!(again, result);
    }

    #[test]
    fn test_similarity_fallback_is_deterministic() {
        let units = vec![
            unit("gpt", "the capital of france is paris"),
            unit("claude", "paris is the capital"),
            unit("gemini", "london"),
        ];
        let first = MajorityVote.aggregate(&units, &[], &priority());

        let mut shuffled = units.clone();
        shuffled.rotate_left(1);
        let second = MajorityVote.aggregate(&shuffled, &[], &priority());

        assert_eq!(first, second);
        assert!(first.confidence > 0.0);
        assert!(first.confidence <= SIMILARITY_CONFIDENCE_CAP);
        assert_eq!(first.agreed_with("gemini"), Some(false));
        assert_eq!(first.agreed_with("gpt"), Some(true));
        assert_eq!(first.agreed_with("claude"), Some(true));
    }

    #[test]
    fn test_similarity_even_split_uses_priority() {
        let units = vec![unit("claude", "alpha"), unit("gpt", "beta")];
        let result = MajorityVote.aggregate(&units, &[], &priority());
        // No overlap at all: both average 0.0, gpt ranks first
        assert_eq!(result.answer.as_deref(), Some("beta"));
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.agreed_with("claude"), Some(false));
    }

    #[test]
    fn test_score_then_priority() {
        assert_eq!(
            score_then_priority((0.9, (1, "b")), (0.5, (0, "a"))),
            Ordering::Less
        );
        assert_eq!(
            score_then_priority((0.5, (1, "b")), (0.5, (0, "a"))),
            Ordering::Greater
        );
    }
}
