//! Consensus aggregation
//!
//! Turns the normalized answers of one run into a single [`ConsensusResult`].
//!
//! # Strategies
//!
//! | Strategy | Winner | Confidence |
//! |----------|--------|------------|
//! | [`MajorityVote`] (default) | largest exact-match group, similarity fallback | group share |
//! | [`HighestConfidence`] | first cleanly extracted answer in priority order | share agreeing with it |
//! | [`WeightedVote`] | group with the greatest summed provider weight | weight share |
//!
//! Every strategy shares the degenerate cases: no usable answer yields an
//! empty result with confidence 0.0, and a single answer is returned with
//! [`SINGLE_SOURCE_CONFIDENCE`].
//!
//! Ties never depend on completion order: they are broken by the configured
//! [`ProviderPriority`].

pub mod highest_confidence;
pub mod majority;
pub mod priority;
pub mod result;
pub mod similarity;
pub mod strategy;
pub mod weighted;

pub use highest_confidence::HighestConfidence;
pub use majority::MajorityVote;
pub use priority::ProviderPriority;
pub use result::{ConsensusResult, ProviderAgreement};
pub use similarity::token_overlap;
pub use strategy::{
    AggregationStrategy, SINGLE_SOURCE_CONFIDENCE, Selection, StrategyKind, group_by_key,
};
pub use weighted::WeightedVote;
