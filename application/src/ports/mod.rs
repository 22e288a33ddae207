//! Port definitions (interfaces for external adapters)

pub mod progress;
pub mod provider;
pub mod result_sink;
