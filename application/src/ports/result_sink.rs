//! Result sink port
//!
//! Egress for finished output records (files, queues, databases).

use async_trait::async_trait;
use llm_plus_domain::OutputRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for output records
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one record
    async fn publish(&self, record: &OutputRecord) -> Result<(), SinkError>;
}
