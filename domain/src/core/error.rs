//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt text cannot be empty")]
    EmptyPrompt,

    #[error("Invalid provider spec: {0}")]
    InvalidProviderSpec(String),

    #[error("Unknown aggregation strategy: {0}. Valid: majority, highest-confidence, weighted")]
    UnknownStrategy(String),

    #[error("Unknown task hint: {0}. Valid: short-answer, free-text")]
    UnknownTaskHint(String),

    #[error("Unknown provider kind: {0}. Valid: openai, anthropic, gemini, debug")]
    UnknownProviderKind(String),
}
