//! Result assembly with consistency checks

use super::output::{OutputRecord, ProviderStatus, ProviderStatusKind};
use crate::answer::unit::AnswerUnit;
use crate::consensus::ConsensusResult;
use crate::core::prompt::RequestId;
use crate::provider::response::ProviderFailure;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Internal accounting violation. Fatal for the run and never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsistencyError {
    #[error("Provider '{0}' is accounted for more than once")]
    DuplicateProvider(String),

    #[error("Enabled provider '{0}' has neither an answer nor a failure")]
    MissingProvider(String),

    #[error("Provider '{0}' is not enabled for this run")]
    UnknownProvider(String),

    #[error("Agreement list {agreement:?} does not match answering providers {answered:?}")]
    AgreementMismatch {
        agreement: Vec<String>,
        answered: Vec<String>,
    },

    #[error("Consensus failure list {consensus:?} does not match failed providers {failed:?}")]
    FailureMismatch {
        consensus: Vec<String>,
        failed: Vec<String>,
    },

    #[error("Confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
}

fn provider_set<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<&'a str> {
    names.into_iter().collect()
}

/// Package a consensus and the per-provider outcomes into an [`OutputRecord`].
///
/// Verifies that every provider in `enabled` appears exactly once across
/// `units` and `failures`, and that the consensus agreement and failure lists
/// cover the same providers. Statuses are emitted in `enabled` order.
pub fn assemble(
    request_id: &RequestId,
    consensus: &ConsensusResult,
    units: &[AnswerUnit],
    failures: &[ProviderFailure],
    enabled: &[String],
    completed_at: DateTime<Utc>,
) -> Result<OutputRecord, ConsistencyError> {
    if !(0.0..=1.0).contains(&consensus.confidence) {
        return Err(ConsistencyError::ConfidenceOutOfRange(consensus.confidence));
    }

    let enabled_set: HashSet<&str> = enabled.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let accounted = units
        .iter()
        .map(|u| u.provider.as_str())
        .chain(failures.iter().map(|f| f.provider.as_str()));
    for provider in accounted {
        if !enabled_set.contains(provider) {
            return Err(ConsistencyError::UnknownProvider(provider.to_string()));
        }
        if !seen.insert(provider) {
            return Err(ConsistencyError::DuplicateProvider(provider.to_string()));
        }
    }
    if let Some(missing) = enabled.iter().find(|p| !seen.contains(p.as_str())) {
        return Err(ConsistencyError::MissingProvider(missing.clone()));
    }

    let answered = provider_set(units.iter().map(|u| u.provider.as_str()));
    let agreement = provider_set(consensus.agreement.iter().map(|a| a.provider.as_str()));
    if answered != agreement || agreement.len() != consensus.agreement.len() {
        return Err(ConsistencyError::AgreementMismatch {
            agreement: consensus.agreement.iter().map(|a| a.provider.clone()).collect(),
            answered: answered.into_iter().map(str::to_string).collect(),
        });
    }

    let failed = provider_set(failures.iter().map(|f| f.provider.as_str()));
    let consensus_failed = provider_set(consensus.failed.iter().map(|f| f.provider.as_str()));
    if failed != consensus_failed || consensus_failed.len() != consensus.failed.len() {
        return Err(ConsistencyError::FailureMismatch {
            consensus: consensus.failed.iter().map(|f| f.provider.clone()).collect(),
            failed: failed.into_iter().map(str::to_string).collect(),
        });
    }

    let providers = enabled
        .iter()
        .filter_map(|name| {
            if let Some(unit) = units.iter().find(|u| &u.provider == name) {
                return Some(ProviderStatus {
                    provider: name.clone(),
                    status: ProviderStatusKind::Succeeded,
                    raw_text: Some(unit.raw_text.clone()),
                    normalized_text: Some(unit.canonical_text.clone()),
                    short_answer: unit.short_answer.clone(),
                    agreed_with_consensus: consensus.agreed_with(name),
                    error_kind: None,
                    error_message: None,
                    attempts: unit.attempts,
                    latency_ms: unit.latency_ms,
                });
            }
            failures
                .iter()
                .find(|f| &f.provider == name)
                .map(|failure| ProviderStatus {
                    provider: name.clone(),
                    status: ProviderStatusKind::Failed,
                    raw_text: None,
                    normalized_text: None,
                    short_answer: None,
                    agreed_with_consensus: None,
                    error_kind: Some(failure.kind),
                    error_message: Some(failure.message.clone()),
                    attempts: failure.attempts,
                    latency_ms: failure.latency_ms,
                })
        })
        .collect();

    Ok(OutputRecord {
        request_id: request_id.clone(),
        answer: consensus.answer.clone().unwrap_or_default(),
        confidence: consensus.confidence,
        strategy: consensus.strategy,
        providers,
        completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::normalizer::Normalizer;
    use crate::consensus::{AggregationStrategy, MajorityVote, ProviderPriority, StrategyKind};
    use crate::core::prompt::TaskHint;
    use crate::provider::error::{ProviderError, ProviderErrorKind};
    use crate::provider::response::RawResponse;
    use std::time::Duration;

    fn enabled() -> Vec<String> {
        vec!["gpt".to_string(), "claude".to_string(), "gemini".to_string()]
    }

    fn run(responses: &[RawResponse]) -> (ConsensusResult, Vec<AnswerUnit>, Vec<ProviderFailure>) {
        let set = Normalizer::new(TaskHint::FreeText).normalize_all(responses);
        let priority = ProviderPriority::new(enabled());
        let consensus = MajorityVote.aggregate(&set.units, &set.failures, &priority);
        (consensus, set.units, set.failures)
    }

    fn ok(provider: &str, text: &str) -> RawResponse {
        RawResponse::success(provider, text, Duration::from_millis(20), 1)
    }

    fn down(provider: &str) -> RawResponse {
        RawResponse::failure(
            provider,
            ProviderError::unavailable("connection refused"),
            Duration::from_millis(30),
            3,
        )
    }

    #[test]
    fn test_statuses_in_enabled_order() {
        let (consensus, units, failures) =
            run(&[down("gemini"), ok("claude", "paris"), ok("gpt", "Paris")]);
        let record = assemble(
            &RequestId::from("req-1"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap();

        let names: Vec<_> = record.providers.iter().map(|s| s.provider.as_str()).collect();
        assert_eq!(names, vec!["gpt", "claude", "gemini"]);
        assert_eq!(record.answer, "paris");
        assert_eq!(record.confidence, 1.0);
        assert_eq!(record.succeeded().count(), 2);

        let gemini = record.status("gemini").unwrap();
        assert_eq!(gemini.status, ProviderStatusKind::Failed);
        assert_eq!(gemini.error_kind, Some(ProviderErrorKind::Unavailable));
        assert_eq!(gemini.attempts, 3);
        assert_eq!(gemini.agreed_with_consensus, None);
        assert_eq!(record.status("gpt").unwrap().agreed_with_consensus, Some(true));
    }

    #[test]
    fn test_all_failed_still_yields_record() {
        let (consensus, units, failures) = run(&[down("gpt"), down("claude"), down("gemini")]);
        let record = assemble(
            &RequestId::from("req-2"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap();

        assert!(!record.has_answer());
        assert_eq!(record.confidence, 0.0);
        assert_eq!(record.failed().count(), 3);
        assert!(
            record
                .providers
                .iter()
                .all(|s| s.error_kind == Some(ProviderErrorKind::Unavailable))
        );
    }

    #[test]
    fn test_missing_provider_rejected() {
        let (consensus, units, failures) = run(&[ok("gpt", "a"), ok("claude", "a")]);
        let err = assemble(
            &RequestId::from("req-3"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, ConsistencyError::MissingProvider("gemini".to_string()));
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let (consensus, units, mut failures) =
            run(&[ok("gpt", "a"), ok("claude", "a"), ok("gemini", "a")]);
        failures.push(ProviderFailure::new("gpt", ProviderErrorKind::Timeout, "late"));
        let err = assemble(
            &RequestId::from("req-4"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, ConsistencyError::DuplicateProvider("gpt".to_string()));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let (consensus, units, failures) =
            run(&[ok("gpt", "a"), ok("claude", "a"), ok("gemini", "a"), ok("llama", "a")]);
        let err = assemble(
            &RequestId::from("req-5"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, ConsistencyError::UnknownProvider("llama".to_string()));
    }

    #[test]
    fn test_agreement_mismatch_rejected() {
        let (mut consensus, units, failures) =
            run(&[ok("gpt", "a"), ok("claude", "a"), ok("gemini", "b")]);
        consensus.agreement.pop();
        let err = assemble(
            &RequestId::from("req-6"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, ConsistencyError::AgreementMismatch { .. }));
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let (mut consensus, units, failures) =
            run(&[ok("gpt", "a"), ok("claude", "a"), ok("gemini", "a")]);
        consensus.confidence = 1.5;
        let err = assemble(
            &RequestId::from("req-7"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, ConsistencyError::ConfidenceOutOfRange(1.5));
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let (consensus, units, failures) = run(&[ok("gpt", "42"), ok("claude", "42"), down("gemini")]);
        let record = assemble(
            &RequestId::from("req-8"),
            &consensus,
            &units,
            &failures,
            &enabled(),
            Utc::now(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();

        assert_eq!(value["requestId"], "req-8");
        assert_eq!(value["strategy"], "majority");
        assert_eq!(value["providers"][0]["status"], "succeeded");
        assert_eq!(value["providers"][0]["agreedWithConsensus"], true);
        assert_eq!(value["providers"][2]["errorKind"], "Unavailable");
        assert!(value["providers"][2].get("rawText").is_none());
        assert!(value.get("completedAt").is_some());
        assert_eq!(consensus.strategy, StrategyKind::Majority);
    }
}
