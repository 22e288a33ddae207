//! Output formatter trait

use llm_plus_domain::{OutputFormat, OutputRecord};

/// Trait for rendering output records
pub trait OutputFormatter {
    /// Consensus plus every provider's status
    fn format_full(&self, record: &OutputRecord) -> String;

    /// Only the consensus answer and its confidence
    fn format_answer(&self, record: &OutputRecord) -> String;

    /// The record as pretty-printed JSON
    fn format_json(&self, record: &OutputRecord) -> String;

    fn render(&self, record: &OutputRecord, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(record),
            OutputFormat::Answer => self.format_answer(record),
            OutputFormat::Json => self.format_json(record),
        }
    }
}
