//! Domain layer for llm-plus
//!
//! This crate contains the core logic of the consensus engine: prompts,
//! provider settings and outcomes, answer normalization, aggregation
//! strategies and result assembly. It performs no I/O and has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Pipeline
//!
//! ```text
//! Prompt ─▶ (application: dispatch) ─▶ RawResponse per provider
//!        ─▶ Normalizer ─▶ AnswerUnit / ProviderFailure
//!        ─▶ AggregationStrategy ─▶ ConsensusResult
//!        ─▶ assemble ─▶ OutputRecord
//! ```

pub mod answer;
pub mod config;
pub mod consensus;
pub mod core;
pub mod provider;
pub mod record;

// Re-export commonly used types
pub use answer::{AnswerUnit, NormalizationConfidence, NormalizedSet, Normalizer};
pub use config::OutputFormat;
pub use consensus::{
    AggregationStrategy, ConsensusResult, ProviderAgreement, ProviderPriority, StrategyKind,
};
pub use core::{
    error::DomainError,
    prompt::{Prompt, RequestId, TaskHint},
};
pub use provider::{
    BackoffPolicy, EndpointConfig, EndpointSettings, ProviderError, ProviderErrorKind,
    ProviderFailure, ProviderKind, ProviderSpec, RawResponse,
};
pub use record::{ConsistencyError, OutputRecord, ProviderStatus, ProviderStatusKind, assemble};
