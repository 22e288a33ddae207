//! Final per-run output record and its assembly

pub mod assembler;
pub mod output;

pub use assembler::{ConsistencyError, assemble};
pub use output::{OutputRecord, ProviderStatus, ProviderStatusKind};
