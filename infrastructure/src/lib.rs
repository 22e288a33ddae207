//! Infrastructure layer for llm-plus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP backends, the offline debug backend,
//! configuration file loading and the JSONL result sink.

pub mod config;
pub mod providers;
pub mod sink;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat,
};
pub use providers::{
    AnthropicAdapter, DebugAdapter, GeminiAdapter, OpenAiAdapter, ProviderRegistry, RegistryError,
};
pub use sink::JsonlResultSink;
