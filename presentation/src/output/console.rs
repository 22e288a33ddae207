//! Console output formatter for consensus results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use llm_plus_domain::{OutputRecord, ProviderStatus};

/// Longest provider answer shown in full mode before it is cut
const ANSWER_PREVIEW_CHARS: usize = 400;

/// Formats output records for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Consensus, confidence and one block per provider
    pub fn format_full(record: &OutputRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Consensus"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Request:".cyan().bold(),
            record.request_id
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Strategy:".cyan().bold(),
            record.strategy
        ));

        output.push_str(&Self::section_header("Providers"));
        for status in &record.providers {
            output.push_str(&Self::provider_block(status));
        }

        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!("\n{}\n", Self::answer_line(record)));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(record: &OutputRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    /// Answer and confidence only (concise output)
    pub fn format_answer(record: &OutputRecord) -> String {
        let answered = record.succeeded().count();
        let total = record.providers.len();
        format!(
            "{}\n{}\n",
            Self::answer_line(record),
            format!("({answered}/{total} providers answered)").dimmed()
        )
    }

    fn answer_line(record: &OutputRecord) -> String {
        if !record.has_answer() {
            return "No consensus: no provider produced a usable answer"
                .red()
                .bold()
                .to_string();
        }
        format!(
            "{} {}",
            record.answer.bold(),
            Self::confidence_label(record.confidence)
        )
    }

    fn confidence_label(confidence: f64) -> String {
        let label = format!("[confidence {:.0}%]", confidence * 100.0);
        if confidence >= 0.66 {
            label.green().to_string()
        } else if confidence >= 0.5 {
            label.yellow().to_string()
        } else {
            label.red().to_string()
        }
    }

    fn provider_block(status: &ProviderStatus) -> String {
        let timing = format!(
            "{} attempt(s), {} ms",
            status.attempts, status.latency_ms
        )
        .dimmed();

        if status.is_success() {
            let marker = match status.agreed_with_consensus {
                Some(true) => "agrees".green(),
                _ => "dissents".yellow(),
            };
            let text = status
                .short_answer
                .as_deref()
                .or(status.raw_text.as_deref())
                .unwrap_or_default();
            format!(
                "\n{} {} {}\n{}\n",
                format!("── {} ──", status.provider).yellow().bold(),
                marker,
                timing,
                Self::indent(&Self::clip(text), "  ")
            )
        } else {
            let kind = status
                .error_kind
                .map(|k| k.as_str())
                .unwrap_or("Unknown");
            format!(
                "\n{} {} {}\n  {}\n",
                format!("── {} ──", status.provider).red().bold(),
                kind.red(),
                timing,
                status.error_message.as_deref().unwrap_or("Unknown")
            )
        }
    }

    fn clip(text: &str) -> String {
        if text.chars().count() <= ANSWER_PREVIEW_CHARS {
            return text.to_string();
        }
        let clipped: String = text.chars().take(ANSWER_PREVIEW_CHARS).collect();
        format!("{clipped}...")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, record: &OutputRecord) -> String {
        Self::format_full(record)
    }

    fn format_answer(&self, record: &OutputRecord) -> String {
        Self::format_answer(record)
    }

    fn format_json(&self, record: &OutputRecord) -> String {
        Self::format_json(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use llm_plus_domain::{
        OutputFormat, ProviderErrorKind, ProviderStatusKind, RequestId, StrategyKind,
    };

    fn succeeded(provider: &str, text: &str, agreed: bool) -> ProviderStatus {
        ProviderStatus {
            provider: provider.to_string(),
            status: ProviderStatusKind::Succeeded,
            raw_text: Some(text.to_string()),
            normalized_text: Some(text.to_lowercase()),
            short_answer: None,
            agreed_with_consensus: Some(agreed),
            error_kind: None,
            error_message: None,
            attempts: 1,
            latency_ms: 120,
        }
    }

    fn failed(provider: &str) -> ProviderStatus {
        ProviderStatus {
            provider: provider.to_string(),
            status: ProviderStatusKind::Failed,
            raw_text: None,
            normalized_text: None,
            short_answer: None,
            agreed_with_consensus: None,
            error_kind: Some(ProviderErrorKind::Timeout),
            error_message: Some("deadline exceeded".to_string()),
            attempts: 2,
            latency_ms: 5000,
        }
    }

    fn record(answer: &str, confidence: f64, providers: Vec<ProviderStatus>) -> OutputRecord {
        OutputRecord {
            request_id: RequestId::from("req-42"),
            answer: answer.to_string(),
            confidence,
            strategy: StrategyKind::Majority,
            providers,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_answer_format() {
        colored::control::set_override(false);
        let record = record(
            "paris",
            2.0 / 3.0,
            vec![
                succeeded("gpt", "Paris", true),
                succeeded("claude", "paris", true),
                succeeded("gemini", "London", false),
            ],
        );
        let output = ConsoleFormatter::format_answer(&record);
        assert!(output.contains("paris [confidence 67%]"));
        assert!(output.contains("(3/3 providers answered)"));
    }

    #[test]
    fn test_full_format_lists_failures() {
        colored::control::set_override(false);
        let record = record("42", 1.0, vec![succeeded("gpt", "42", true), failed("gemini")]);
        let output = ConsoleFormatter::format_full(&record);
        assert!(output.contains("── gpt ── agrees"));
        assert!(output.contains("── gemini ── Timeout"));
        assert!(output.contains("deadline exceeded"));
        assert!(output.contains("Strategy: majority"));
    }

    #[test]
    fn test_no_consensus_message() {
        colored::control::set_override(false);
        let record = record("", 0.0, vec![failed("gpt")]);
        let output = ConsoleFormatter.render(&record, OutputFormat::Answer);
        assert!(output.contains("No consensus"));
        assert!(output.contains("(0/1 providers answered)"));
    }

    #[test]
    fn test_json_format_is_record() {
        let record = record("42", 1.0, vec![succeeded("gpt", "42", true)]);
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&record)).unwrap();
        assert_eq!(value["requestId"], "req-42");
        assert_eq!(value["answer"], "42");
    }

    #[test]
    fn test_long_answers_clipped() {
        let long = "a".repeat(ANSWER_PREVIEW_CHARS + 10);
        assert!(ConsoleFormatter::clip(&long).ends_with("..."));
        assert_eq!(ConsoleFormatter::clip("short"), "short");
    }
}
