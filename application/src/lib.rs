//! Application layer for llm-plus
//!
//! This crate contains the dispatch coordinator, the consensus use case,
//! port definitions and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod dispatch;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{ConsensusParams, DispatchParams};
pub use dispatch::{DispatchCoordinator, ProviderHandle};
pub use ports::{
    progress::{DispatchProgress, NoProgress},
    provider::ProviderAdapter,
    result_sink::{ResultSink, SinkError},
};
pub use use_cases::run_consensus::{RunConsensusError, RunConsensusUseCase};
