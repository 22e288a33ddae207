//! Normalization of free-form provider output.
//!
//! Provider responses have arbitrary shape. [`Normalizer`] is the single
//! conversion step that turns each [`RawResponse`](crate::provider::RawResponse)
//! into a fixed-shape [`AnswerUnit`] that aggregation can compare.

pub mod normalizer;
pub mod unit;

pub use normalizer::{
    NormalizedSet, Normalizer, canonicalize, comparison_key, extract_short_answer,
};
pub use unit::{AnswerUnit, NormalizationConfidence};
