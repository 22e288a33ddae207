//! CLI command definitions

use clap::{Parser, ValueEnum};
use llm_plus_domain::{StrategyKind, TaskHint};
use std::path::PathBuf;

/// Output format for consensus results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Consensus plus every provider's status and answer
    Full,
    /// Only the consensus answer and its confidence
    Answer,
    /// The output record as JSON
    Json,
}

impl From<OutputFormat> for llm_plus_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Answer => Self::Answer,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for llm-plus
#[derive(Parser, Debug)]
#[command(name = "llm-plus")]
#[command(author, version, about = "Ask several LLMs the same question and report their consensus")]
#[command(long_about = r#"
llm-plus sends one prompt to every enabled provider in parallel, normalizes
their answers and aggregates them into a single consensus with a confidence
score. Failed or slow providers are recorded, never fatal.

Configuration files are loaded from (in priority order):
1. LLM_PLUS_* environment variables
2. --config <path>       Explicit config file
3. ./llm-plus.toml       Project-level config
4. ~/.config/llm-plus/config.toml   Global config

Example:
  llm-plus "What is the capital of France?"
  llm-plus --task-hint short-answer --strategy weighted "What is 17 * 23?"
  llm-plus --prompt-file extracted.txt --output json --sink runs.jsonl
  llm-plus --debug-providers "Dry run without API keys"
"#)]
pub struct Cli {
    /// The question to ask (omit when using --prompt-file)
    pub question: Option<String>,

    /// Read the prompt from a plain-text file
    #[arg(long, value_name = "PATH", conflicts_with = "question")]
    pub prompt_file: Option<PathBuf>,

    /// Aggregation strategy (majority, highest-confidence, weighted)
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Option<StrategyKind>,

    /// How answers are compared (short-answer, free-text)
    #[arg(long, value_name = "HINT")]
    pub task_hint: Option<TaskHint>,

    /// Per-prompt deadline in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub deadline: Option<u64>,

    /// Only query these providers (can be specified multiple times)
    #[arg(short, long = "provider", value_name = "NAME")]
    pub providers: Vec<String>,

    /// Answer with simulated responses instead of calling any backend
    #[arg(long)]
    pub debug_providers: bool,

    /// Append the output record to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub sink: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "llm-plus",
            "--strategy",
            "weighted",
            "--task-hint",
            "short-answer",
            "-p",
            "gpt",
            "-p",
            "claude",
            "--deadline",
            "30",
            "-o",
            "json",
            "-vv",
            "Capital of France?",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("Capital of France?"));
        assert_eq!(cli.strategy, Some(StrategyKind::Weighted));
        assert_eq!(cli.task_hint, Some(TaskHint::ShortAnswer));
        assert_eq!(cli.providers, vec!["gpt", "claude"]);
        assert_eq!(cli.deadline, Some(30));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result = Cli::try_parse_from(["llm-plus", "--strategy", "borda", "q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_file_conflicts_with_question() {
        let result = Cli::try_parse_from(["llm-plus", "--prompt-file", "p.txt", "q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_maps_to_domain_format() {
        let format: llm_plus_domain::OutputFormat = OutputFormat::Answer.into();
        assert_eq!(format, llm_plus_domain::OutputFormat::Answer);
    }
}
