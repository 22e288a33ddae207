//! CLI entrypoint for llm-plus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use llm_plus_application::{DispatchCoordinator, DispatchProgress, RunConsensusUseCase};
use llm_plus_domain::{OutputFormat, Prompt, ProviderSpec};
use llm_plus_infrastructure::{ConfigLoader, FileConfig, JsonlResultSink, ProviderRegistry};
use llm_plus_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install the stderr subscriber and, with `--log-dir`, a daily-rotated file layer.
///
/// `RUST_LOG` takes precedence over the `-v` count.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "llm-plus.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Apply `--provider` restrictions, keeping configured order
fn select_providers(specs: Vec<ProviderSpec>, wanted: &[String]) -> Result<Vec<ProviderSpec>> {
    if wanted.is_empty() {
        return Ok(specs);
    }
    if let Some(unknown) = wanted
        .iter()
        .find(|name| !specs.iter().any(|s| &s.name == *name))
    {
        let known: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        bail!(
            "Unknown provider '{}'. Configured: {}",
            unknown,
            known.join(", ")
        );
    }
    Ok(specs
        .into_iter()
        .filter(|s| wanted.contains(&s.name))
        .map(|mut s| {
            s.enabled = true;
            s
        })
        .collect())
}

fn read_prompt_text(cli: &Cli) -> Result<String> {
    match (&cli.question, &cli.prompt_file) {
        (Some(question), _) => Ok(question.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file {}", path.display())),
        (None, None) => bail!("A question is required. Pass it as an argument or use --prompt-file."),
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config error: {issue}");
        }
        bail!("Configuration is invalid ({} issue(s))", issues.len());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting llm-plus");

    let config = load_config(&cli)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    // === Parameters (CLI overrides config) ===
    let specs = select_providers(config.provider_specs()?, &cli.providers)?;

    let mut consensus_params = config.consensus_params()?;
    if let Some(strategy) = cli.strategy {
        consensus_params = consensus_params.with_strategy(strategy);
    }

    let mut dispatch_params = config.dispatch_params();
    if let Some(seconds) = cli.deadline {
        if seconds == 0 {
            bail!("--deadline must be at least 1 second");
        }
        dispatch_params = dispatch_params.with_default_deadline(Duration::from_secs(seconds));
    }

    let task_hint = match cli.task_hint {
        Some(hint) => hint,
        None => config.task_hint()?,
    };

    let prompt = Prompt::new(read_prompt_text(&cli)?)?
        .with_task_hint(task_hint);
    debug!(request_id = %prompt.request_id(), task_hint = %task_hint, "Prompt ready");

    // === Dependency Injection ===
    let registry =
        ProviderRegistry::new(config.endpoint_config())?.with_debug_providers(cli.debug_providers);
    let coordinator = DispatchCoordinator::new(registry.build(specs)?, dispatch_params);
    let mut use_case = RunConsensusUseCase::new(coordinator, consensus_params);

    if let Some(path) = cli.sink.as_ref().or(config.output.sink.as_ref()) {
        let sink = JsonlResultSink::open(path)
            .with_context(|| format!("Failed to open result sink {}", path.display()))?;
        use_case = use_case.with_sink(Arc::new(sink));
    }

    // Execute with or without progress reporting
    let record = if cli.quiet {
        use_case.execute(prompt).await?
    } else {
        // Plain lines when stderr is redirected
        let progress: Box<dyn DispatchProgress> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case.execute_with_progress(prompt, progress.as_ref()).await?
    };

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    print!("{}", ConsoleFormatter.render(&record, format));
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_providers_keeps_config_order() {
        let specs = ProviderSpec::defaults();
        let selected =
            select_providers(specs, &["gemini".to_string(), "gpt".to_string()]).unwrap();
        let names: Vec<_> = selected.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["gpt", "gemini"]);
    }

    #[test]
    fn test_select_unknown_provider_fails() {
        let result = select_providers(ProviderSpec::defaults(), &["llama".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_selected_provider_is_enabled() {
        let specs = vec![ProviderSpec::new("gpt", "gpt-4o").disabled()];
        let selected = select_providers(specs, &["gpt".to_string()]).unwrap();
        assert!(selected[0].enabled);
    }
}
