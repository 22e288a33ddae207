//! Progress notification port
//!
//! Defines the interface for reporting progress while providers are queried.

use llm_plus_domain::RawResponse;
use std::time::Duration;

/// Callback for progress updates during a dispatch
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, nothing at all).
pub trait DispatchProgress: Send + Sync {
    /// Called once before any provider is queried
    fn on_dispatch_start(&self, providers: &[String]);

    /// Called when a failed attempt will be retried after `delay`
    fn on_retry_scheduled(&self, provider: &str, attempt: u32, delay: Duration);

    /// Called when a provider reaches its final outcome (after retries)
    fn on_provider_complete(&self, response: &RawResponse);

    /// Called when every provider has an outcome or the deadline passed
    fn on_dispatch_complete(&self, succeeded: usize, failed: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DispatchProgress for NoProgress {
    fn on_dispatch_start(&self, _providers: &[String]) {}
    fn on_retry_scheduled(&self, _provider: &str, _attempt: u32, _delay: Duration) {}
    fn on_provider_complete(&self, _response: &RawResponse) {}
    fn on_dispatch_complete(&self, _succeeded: usize, _failed: usize) {}
}
