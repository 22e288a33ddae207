//! Conversion of raw provider text into comparable answer units.
//!
//! Pure text processing without I/O. Extraction never fails: when no answer
//! marker can be found, the normalizer falls back to a heuristic and marks
//! the unit [`NormalizationConfidence::Heuristic`].
//!
//! | Step | Output |
//! |------|--------|
//! | [`canonicalize`] | trimmed text, surrounding code fence removed |
//! | [`extract_short_answer`] | text after the last `Answer:` marker, else the final line |
//! | [`comparison_key`] | lower-cased, whitespace-collapsed key |

use super::unit::{AnswerUnit, NormalizationConfidence};
use crate::core::prompt::TaskHint;
use crate::core::string::collapse_whitespace;
use crate::provider::error::ProviderError;
use crate::provider::response::{ProviderFailure, RawResponse};
use regex::Regex;
use std::sync::LazyLock;

/// `Answer: X`, `Final answer: X`, `**Answer:** X` (case-insensitive)
static ANSWER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:final\s+)?answer[\s*_]*[:：][\s*_]*(?P<answer>[^\n]*)")
        .expect("answer marker pattern is valid")
});

/// Trim the text and strip a markdown code fence wrapping the whole answer.
///
/// ```
/// use llm_plus_domain::answer::canonicalize;
///
/// assert_eq!(canonicalize("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(canonicalize("  Paris \n"), "Paris");
/// ```
pub fn canonicalize(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    // Drop the info string (e.g. "json") on the opening fence line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        // A lone opening fence carries nothing but its info string
        None if !rest.ends_with("```") => "",
        None => rest,
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Key used to decide whether two answers match exactly.
pub fn comparison_key(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

/// Extract a short-form answer from free text.
///
/// Returns the content after the last answer marker with
/// [`NormalizationConfidence::Exact`]; otherwise the last non-empty line with
/// [`NormalizationConfidence::Heuristic`]. Trailing sentence punctuation and
/// markdown emphasis are removed.
pub fn extract_short_answer(text: &str) -> (String, NormalizationConfidence) {
    let marked = ANSWER_MARKER
        .captures_iter(text)
        .filter_map(|caps| caps.name("answer"))
        .map(|m| clean_short_answer(m.as_str()))
        .filter(|answer| !answer.is_empty())
        .last();

    if let Some(answer) = marked {
        return (answer, NormalizationConfidence::Exact);
    }

    let last_line = text
        .lines()
        .map(clean_short_answer)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or_else(|| text.trim().to_string());

    (last_line, NormalizationConfidence::Heuristic)
}

fn clean_short_answer(s: &str) -> String {
    s.trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`')
        .trim()
        .trim_end_matches(['.', '!'])
        .trim()
        .to_string()
}

/// Normalized answers and failures of one dispatch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSet {
    pub units: Vec<AnswerUnit>,
    pub failures: Vec<ProviderFailure>,
}

/// Turns raw provider responses into [`AnswerUnit`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    hint: TaskHint,
}

impl Normalizer {
    pub fn new(hint: TaskHint) -> Self {
        Self { hint }
    }

    /// Normalize one response; failed responses become failure entries.
    ///
    /// A success whose answer is empty once normalized (e.g. a bare code
    /// fence) is reported as an `InvalidResponse` failure.
    pub fn normalize(&self, response: &RawResponse) -> Result<AnswerUnit, ProviderFailure> {
        let raw_text = match &response.outcome {
            Ok(text) => text,
            Err(error) => {
                return Err(ProviderFailure::from_error(
                    &response.provider,
                    error,
                    response.attempts,
                    response.latency_ms(),
                ));
            }
        };

        let canonical_text = canonicalize(raw_text);
        let (short_answer, normalization) = if self.hint.wants_short_answer() {
            let (answer, confidence) = extract_short_answer(&canonical_text);
            (Some(answer), confidence)
        } else {
            (None, NormalizationConfidence::Exact)
        };
        if canonical_text.is_empty() || short_answer.as_deref().is_some_and(str::is_empty) {
            return Err(ProviderFailure::from_error(
                &response.provider,
                &ProviderError::invalid_response("empty answer after normalization"),
                response.attempts,
                response.latency_ms(),
            ));
        }
        let comparison_key =
            comparison_key(short_answer.as_deref().unwrap_or(&canonical_text));

        Ok(AnswerUnit {
            provider: response.provider.clone(),
            raw_text: raw_text.clone(),
            canonical_text,
            comparison_key,
            short_answer,
            normalization,
            attempts: response.attempts,
            latency_ms: response.latency_ms(),
        })
    }

    /// Normalize a full dispatch result, splitting usable answers from failures.
    pub fn normalize_all<'a>(
        &self,
        responses: impl IntoIterator<Item = &'a RawResponse>,
    ) -> NormalizedSet {
        let mut set = NormalizedSet::default();
        for response in responses {
            match self.normalize(response) {
                Ok(unit) => set.units.push(unit),
                Err(failure) => set.failures.push(failure),
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::error::ProviderErrorKind;
    use std::time::Duration;

    fn ok(provider: &str, text: &str) -> RawResponse {
        RawResponse::success(provider, text, Duration::from_millis(10), 1)
    }

    // ==================== canonicalize ====================

    #[test]
    fn test_canonicalize_keeps_casing() {
        assert_eq!(canonicalize("  The answer is Paris.\n"), "The answer is Paris.");
    }

    #[test]
    fn test_canonicalize_strips_code_fence() {
        assert_eq!(canonicalize("```\nplain\n```"), "plain");
        assert_eq!(
            canonicalize("```json\n{\"answer\": \"Paris\"}\n```"),
            "{\"answer\": \"Paris\"}"
        );
    }

    #[test]
    fn test_canonicalize_unterminated_fence() {
        assert_eq!(canonicalize("```rust\nfn main() {}"), "fn main() {}");
    }

    #[test]
    fn test_canonicalize_bare_fences_are_empty() {
        assert_eq!(canonicalize("```\n```"), "");
        assert_eq!(canonicalize("```json"), "");
        assert_eq!(canonicalize("```Paris```"), "Paris");
    }

    #[test]
    fn test_comparison_key() {
        assert_eq!(comparison_key("  Paris "), "paris");
        assert_eq!(comparison_key("New\n  York"), "new york");
    }

    // ==================== extract_short_answer ====================

    #[test]
    fn test_extract_with_marker() {
        let (answer, confidence) =
            extract_short_answer("Let me think.\nFrance's capital...\nAnswer: Paris");
        assert_eq!(answer, "Paris");
        assert_eq!(confidence, NormalizationConfidence::Exact);
    }

    #[test]
    fn test_extract_final_answer_markdown() {
        let (answer, confidence) = extract_short_answer("Reasoning...\n**Final Answer:** 42.");
        assert_eq!(answer, "42");
        assert_eq!(confidence, NormalizationConfidence::Exact);
    }

    #[test]
    fn test_extract_uses_last_marker() {
        let (answer, _) = extract_short_answer("Answer: 3\nWait, recount.\nAnswer: 4");
        assert_eq!(answer, "4");
    }

    #[test]
    fn test_extract_marker_on_next_line() {
        let (answer, confidence) = extract_short_answer("Answer:\nParis");
        assert_eq!(answer, "Paris");
        assert_eq!(confidence, NormalizationConfidence::Exact);
    }

    #[test]
    fn test_extract_falls_back_to_last_line() {
        let (answer, confidence) = extract_short_answer("Some reasoning.\n\nParis.\n\n");
        assert_eq!(answer, "Paris");
        assert_eq!(confidence, NormalizationConfidence::Heuristic);
    }

    #[test]
    fn test_extract_empty_text_never_panics() {
        let (answer, confidence) = extract_short_answer("");
        assert_eq!(answer, "");
        assert_eq!(confidence, NormalizationConfidence::Heuristic);
    }

    // ==================== Normalizer ====================

    #[test]
    fn test_free_text_unit() {
        let unit = Normalizer::new(TaskHint::FreeText)
            .normalize(&ok("gpt", "  Rust is  a systems language. "))
            .unwrap();
        assert_eq!(unit.canonical_text, "Rust is  a systems language.");
        assert_eq!(unit.comparison_key, "rust is a systems language.");
        assert!(unit.short_answer.is_none());
        assert_eq!(unit.normalization, NormalizationConfidence::Exact);
        assert_eq!(unit.answer(), "Rust is  a systems language.");
    }

    #[test]
    fn test_short_answer_unit_votes_on_extraction() {
        let unit = Normalizer::new(TaskHint::ShortAnswer)
            .normalize(&ok("claude", "The capital of France.\nAnswer: PARIS"))
            .unwrap();
        assert_eq!(unit.short_answer.as_deref(), Some("PARIS"));
        assert_eq!(unit.comparison_key, "paris");
        assert_eq!(unit.answer(), "PARIS");
        assert_eq!(unit.raw_text, "The capital of France.\nAnswer: PARIS");
    }

    #[test]
    fn test_normalize_all_splits_failures() {
        let responses = vec![
            ok("gpt", "Paris"),
            RawResponse::failure(
                "gemini",
                ProviderError::timeout("deadline elapsed"),
                Duration::from_secs(2),
                2,
            ),
        ];
        let set = Normalizer::new(TaskHint::ShortAnswer).normalize_all(&responses);
        assert_eq!(set.units.len(), 1);
        assert_eq!(set.units[0].provider, "gpt");
        assert_eq!(set.failures.len(), 1);
        assert_eq!(set.failures[0].kind, ProviderErrorKind::Timeout);
        assert_eq!(set.failures[0].attempts, 2);
    }

    #[test]
    fn test_empty_after_normalization_is_invalid_response() {
        for hint in [TaskHint::FreeText, TaskHint::ShortAnswer] {
            let normalizer = Normalizer::new(hint);
            for text in ["```\n```", "```json"] {
                let failure = normalizer.normalize(&ok("gpt", text)).unwrap_err();
                assert_eq!(failure.provider, "gpt");
                assert_eq!(failure.kind, ProviderErrorKind::InvalidResponse);
                assert_eq!(failure.attempts, 1);
            }
        }
    }
}
