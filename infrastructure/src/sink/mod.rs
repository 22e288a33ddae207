//! Result sink adapters

pub mod jsonl;

pub use jsonl::JsonlResultSink;
