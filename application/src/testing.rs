//! Scripted provider adapter for use-case tests

use crate::ports::provider::ProviderAdapter;
use async_trait::async_trait;
use llm_plus_domain::{Prompt, ProviderError};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Replays a fixed script of outcomes; the final entry repeats forever.
pub struct ScriptedAdapter {
    name: String,
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    delay: Duration,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedAdapter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            script: Mutex::new(VecDeque::new()),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then_ok(self, text: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn then_err(self, error: ProviderError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &Prompt) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(Instant::now());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let mut script = self.script.lock().unwrap();
        match script.len() {
            0 => Err(ProviderError::unavailable("script exhausted")),
            1 => script[0].clone(),
            _ => script.pop_front().unwrap_or_else(|| Err(ProviderError::unavailable("empty"))),
        }
    }
}
