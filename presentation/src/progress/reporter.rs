//! Progress reporting while providers are queried

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use llm_plus_application::DispatchProgress;
use llm_plus_domain::RawResponse;
use std::sync::Mutex;
use std::time::Duration;

/// One-line outcome label for a finished provider
fn outcome_label(response: &RawResponse) -> String {
    match response.error() {
        None => format!("{} {}", "v".green(), response.provider),
        Some(error) => format!("{} {} ({})", "x".red(), response.provider, error.kind()),
    }
}

/// Reports progress with an indicatif bar (one tick per provider)
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchProgress for ProgressReporter {
    fn on_dispatch_start(&self, providers: &[String]) {
        let pb = ProgressBar::new(providers.len() as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Querying providers");
        pb.set_message(providers.join(", "));
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_retry_scheduled(&self, provider: &str, attempt: u32, delay: Duration) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!(
                "{} attempt {} failed, retrying in {}ms",
                provider,
                attempt,
                delay.as_millis()
            ));
        }
    }

    fn on_provider_complete(&self, response: &RawResponse) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.println(format!("  {}", outcome_label(response)));
            pb.inc(1);
        }
    }

    fn on_dispatch_complete(&self, succeeded: usize, failed: usize) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            let summary = format!("{succeeded} answered, {failed} failed");
            if succeeded > 0 {
                pb.finish_with_message(summary.green().to_string());
            } else {
                pb.finish_with_message(summary.red().to_string());
            }
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl DispatchProgress for SimpleProgress {
    fn on_dispatch_start(&self, providers: &[String]) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            "Querying".bold(),
            providers.len()
        );
    }

    fn on_retry_scheduled(&self, provider: &str, attempt: u32, delay: Duration) {
        eprintln!(
            "  {} {} attempt {} failed, retrying in {}ms",
            "~".yellow(),
            provider,
            attempt,
            delay.as_millis()
        );
    }

    fn on_provider_complete(&self, response: &RawResponse) {
        eprintln!("  {}", outcome_label(response));
    }

    fn on_dispatch_complete(&self, succeeded: usize, failed: usize) {
        eprintln!("  {succeeded} answered, {failed} failed");
    }
}
