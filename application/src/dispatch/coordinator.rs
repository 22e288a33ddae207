//! Concurrent fan-out of one prompt to every enabled provider

use super::retry::{RetryDecision, RetryState};
use crate::config::DispatchParams;
use crate::ports::progress::DispatchProgress;
use crate::ports::provider::ProviderAdapter;
use llm_plus_domain::{Prompt, ProviderError, ProviderSpec, RawResponse};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{self, JoinSet};
use tokio::time::{Instant, sleep, timeout_at};
use tracing::{debug, info, warn};

/// Extra time granted to tasks to report their own timeout before they are
/// aborted from outside
const ABANDON_GRACE: Duration = Duration::from_millis(50);

/// Sent by a provider task when it schedules another attempt
#[derive(Debug)]
struct RetryNotice {
    provider: String,
    attempt: u32,
    delay: Duration,
}

/// A configured provider paired with the adapter that serves it
#[derive(Clone)]
pub struct ProviderHandle {
    pub spec: Arc<ProviderSpec>,
    pub adapter: Arc<dyn ProviderAdapter>,
}

impl ProviderHandle {
    pub fn new(spec: ProviderSpec, adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            spec: Arc::new(spec),
            adapter,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }
}

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("spec", &self.spec)
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

/// Issues a prompt to all enabled providers concurrently, applying each
/// provider's retry policy and the prompt deadline.
///
/// Every enabled provider yields exactly one [`RawResponse`]: an answer or a
/// classified failure. Providers still pending when the deadline passes are
/// abandoned and recorded as [`ProviderError::Timeout`].
pub struct DispatchCoordinator {
    providers: Vec<ProviderHandle>,
    params: DispatchParams,
}

impl DispatchCoordinator {
    /// Disabled providers are dropped here and never queried
    pub fn new(providers: Vec<ProviderHandle>, params: DispatchParams) -> Self {
        let providers = providers.into_iter().filter(|p| p.spec.enabled).collect();
        Self { providers, params }
    }

    /// Names of the enabled providers, in configured (priority) order
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn deadline_for(&self, prompt: &Prompt) -> Instant {
        match prompt.deadline() {
            Some(deadline) => Instant::from_std(deadline),
            None => Instant::now() + self.params.default_deadline,
        }
    }

    /// Dispatch the prompt; responses come back in configured order
    pub async fn dispatch(
        &self,
        prompt: &Prompt,
        progress: &dyn DispatchProgress,
    ) -> Vec<RawResponse> {
        let names = self.provider_names();
        let deadline = self.deadline_for(prompt);
        info!(
            request_id = %prompt.request_id(),
            providers = names.len(),
            "Dispatching prompt"
        );
        progress.on_dispatch_start(&names);

        let started = Instant::now();
        let (retry_tx, mut retry_rx) = mpsc::unbounded_channel();
        let mut join_set = JoinSet::new();
        let mut task_providers: HashMap<task::Id, String> = HashMap::new();
        for handle in &self.providers {
            let name = handle.name().to_string();
            let handle = handle.clone();
            let prompt = prompt.clone();
            let retry_tx = retry_tx.clone();
            let task = join_set.spawn(async move {
                Self::query_provider(handle, prompt, deadline, retry_tx).await
            });
            task_providers.insert(task.id(), name);
        }
        drop(retry_tx);

        let mut collected: HashMap<String, RawResponse> = HashMap::new();
        let mut abandoned = false;
        loop {
            let joined = tokio::select! {
                Some(notice) = retry_rx.recv() => {
                    progress.on_retry_scheduled(&notice.provider, notice.attempt, notice.delay);
                    continue;
                }
                joined = timeout_at(deadline + ABANDON_GRACE, join_set.join_next()) => joined,
            };
            match joined {
                Ok(Some(Ok(response))) => {
                    progress.on_provider_complete(&response);
                    collected.insert(response.provider.clone(), response);
                }
                Ok(Some(Err(e))) => {
                    let Some(name) = task_providers.get(&e.id()) else {
                        warn!("Join error for an unknown provider task: {}", e);
                        continue;
                    };
                    warn!(provider = %name, "Provider task failed: {}", e);
                    let response = RawResponse::failure(
                        name.clone(),
                        ProviderError::unavailable(format!("provider task failed: {e}")),
                        started.elapsed(),
                        1,
                    );
                    progress.on_provider_complete(&response);
                    collected.insert(name.clone(), response);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        pending = join_set.len(),
                        "Deadline passed, abandoning pending providers"
                    );
                    join_set.abort_all();
                    abandoned = true;
                    break;
                }
            }
        }

        let responses: Vec<RawResponse> = names
            .iter()
            .map(|name| match collected.remove(name) {
                Some(response) => response,
                None => {
                    let response = if abandoned {
                        RawResponse::failure(
                            name.clone(),
                            ProviderError::timeout("abandoned at prompt deadline"),
                            Duration::ZERO,
                            1,
                        )
                    } else {
                        RawResponse::failure(
                            name.clone(),
                            ProviderError::unavailable("provider task ended without a result"),
                            Duration::ZERO,
                            1,
                        )
                    };
                    progress.on_provider_complete(&response);
                    response
                }
            })
            .collect();

        let succeeded = responses.iter().filter(|r| r.is_success()).count();
        info!(
            request_id = %prompt.request_id(),
            succeeded,
            failed = responses.len() - succeeded,
            "Dispatch complete"
        );
        progress.on_dispatch_complete(succeeded, responses.len() - succeeded);
        responses
    }

    /// Query one provider until it answers, fails for good or runs out of time
    async fn query_provider(
        handle: ProviderHandle,
        prompt: Prompt,
        deadline: Instant,
        retries: mpsc::UnboundedSender<RetryNotice>,
    ) -> RawResponse {
        let name = handle.name().to_string();
        let mut state = RetryState::new(Arc::clone(&handle.spec), deadline);

        loop {
            let attempt_deadline = state.begin_attempt();
            debug!(provider = %name, attempt = state.attempts(), "Querying provider");

            let outcome = match timeout_at(attempt_deadline, handle.adapter.call(&prompt)).await {
                Ok(response) => response.outcome,
                Err(_) => Err(ProviderError::timeout(format!(
                    "no answer within {}ms",
                    handle.spec.timeout.as_millis()
                ))),
            };

            let error = match outcome {
                Ok(text) => {
                    info!(provider = %name, attempts = state.attempts(), "Provider answered");
                    return RawResponse::success(name, text, state.elapsed(), state.attempts());
                }
                Err(error) => error,
            };

            match state.next_step(&error, Instant::now()) {
                RetryDecision::Retry(delay) => {
                    warn!(
                        provider = %name,
                        attempt = state.attempts(),
                        delay_ms = delay.as_millis() as u64,
                        "Attempt failed, retrying: {}",
                        error
                    );
                    // The receiver is gone only once dispatch stopped waiting
                    let _ = retries.send(RetryNotice {
                        provider: name.clone(),
                        attempt: state.attempts(),
                        delay,
                    });
                    sleep(delay).await;
                }
                RetryDecision::GiveUp => {
                    warn!(provider = %name, attempts = state.attempts(), "Provider failed: {}", error);
                    return RawResponse::failure(name, error, state.elapsed(), state.attempts());
                }
                RetryDecision::OutOfTime => {
                    warn!(provider = %name, attempts = state.attempts(), "Prompt deadline reached: {}", error);
                    let error = match error {
                        ProviderError::Timeout(_) => error,
                        other => ProviderError::timeout(format!(
                            "prompt deadline reached after: {}",
                            other
                        )),
                    };
                    return RawResponse::failure(name, error, state.elapsed(), state.attempts());
                }
            }
        }
    }
}
