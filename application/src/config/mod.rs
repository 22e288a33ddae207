//! Application-level configuration.
//!
//! Configuration types that control how the use cases behave:
//!
//! - [`DispatchParams`]: fallback per-prompt deadline
//! - [`ConsensusParams`]: aggregation strategy and provider weights

pub mod consensus_params;
pub mod dispatch_params;

pub use consensus_params::ConsensusParams;
pub use dispatch_params::DispatchParams;
