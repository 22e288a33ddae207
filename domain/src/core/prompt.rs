//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How the providers' answers should be read (Value Object)
///
/// - `ShortAnswer`: a final short-form answer is extracted from each response
///   and used for voting
/// - `FreeText`: the whole response is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskHint {
    ShortAnswer,
    #[default]
    FreeText,
}

impl TaskHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskHint::ShortAnswer => "short-answer",
            TaskHint::FreeText => "free-text",
        }
    }

    /// Whether answers should go through short-answer extraction
    pub fn wants_short_answer(&self) -> bool {
        matches!(self, TaskHint::ShortAnswer)
    }
}

impl std::fmt::Display for TaskHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskHint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "short-answer" | "short" => Ok(TaskHint::ShortAnswer),
            "free-text" | "free" | "text" => Ok(TaskHint::FreeText),
            _ => Err(DomainError::UnknownTaskHint(s.to_string())),
        }
    }
}

/// Correlation identifier for one run, carried through logs and the output record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A query to be answered by every enabled provider (Value Object)
///
/// The text is already plain text; extraction from PDFs or images happens
/// before a `Prompt` is built. The optional deadline is absolute: once it
/// passes, dispatch stops waiting for outstanding providers.
///
/// # Example
///
/// ```
/// use llm_plus_domain::{Prompt, TaskHint};
/// use std::time::Duration;
///
/// let prompt = Prompt::new("What is the capital of France?")
///     .unwrap()
///     .with_task_hint(TaskHint::ShortAnswer)
///     .with_timeout(Duration::from_secs(30));
/// assert!(prompt.deadline().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
    task_hint: TaskHint,
    request_id: RequestId,
    deadline: Option<Instant>,
}

impl Prompt {
    /// Create a prompt with a fresh request id, no deadline and the free-text hint
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(Self {
            text,
            task_hint: TaskHint::default(),
            request_id: RequestId::generate(),
            deadline: None,
        })
    }

    pub fn with_task_hint(mut self, hint: TaskHint) -> Self {
        self.task_hint = hint;
        self
    }

    pub fn with_request_id(mut self, id: RequestId) -> Self {
        self.request_id = id;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline relative to now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn task_hint(&self) -> TaskHint {
        self.task_hint
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let prompt = Prompt::new("What is Rust?").unwrap();
        assert_eq!(prompt.text(), "What is Rust?");
        assert_eq!(prompt.task_hint(), TaskHint::FreeText);
        assert!(prompt.deadline().is_none());
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(Prompt::new(""), Err(DomainError::EmptyPrompt));
        assert_eq!(Prompt::new("  \n "), Err(DomainError::EmptyPrompt));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = Prompt::new("q").unwrap();
        let b = Prompt::new("q").unwrap();
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn test_explicit_request_id() {
        let prompt = Prompt::new("q").unwrap().with_request_id("req-42".into());
        assert_eq!(prompt.request_id().as_str(), "req-42");
    }

    #[test]
    fn test_with_timeout_sets_future_deadline() {
        let before = Instant::now();
        let prompt = Prompt::new("q")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert!(prompt.deadline().unwrap() > before);
    }

    #[test]
    fn test_parse_task_hint() {
        assert_eq!("short-answer".parse::<TaskHint>(), Ok(TaskHint::ShortAnswer));
        assert_eq!("short_answer".parse::<TaskHint>(), Ok(TaskHint::ShortAnswer));
        assert_eq!("Free-Text".parse::<TaskHint>(), Ok(TaskHint::FreeText));
        assert!("essay".parse::<TaskHint>().is_err());
    }

    #[test]
    fn test_task_hint_serde() {
        let json = serde_json::to_string(&TaskHint::ShortAnswer).unwrap();
        assert_eq!(json, "\"short-answer\"");
    }
}
