//! Docsieve LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from `docsieve-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing, with per-call scripting
//! - `OpenAiProvider`: Hosted chat-completions API integration
//!
//! # Examples
//!
//! ```
//! use docsieve_llm::MockProvider;
//! use docsieve_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"fields": []}"#);
//! let result = provider.complete("test prompt", None).unwrap();
//! assert_eq!(result, r#"{"fields": []}"#);
//! ```

#![warn(missing_docs)]

pub mod openai;

use docsieve_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Extract the JSON payload from an LLM response.
///
/// Models sometimes wrap JSON in markdown code fences despite instructions;
/// this strips a leading ```` ```json ```` (or bare ```` ``` ````) fence and
/// the trailing fence line, and trims surrounding whitespace.
pub fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Skip first line (```json or ```) and last line (```)
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        lines[1..end].join("\n")
    } else {
        trimmed.to_string()
    }
}

/// One scripted reply in a [`MockProvider`] sequence.
#[derive(Debug, Clone)]
enum Scripted {
    Response(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns a fixed response, or a scripted sequence of responses and errors
/// consumed one per call. Sequencing lets consensus tests feed a different
/// reply to each extraction run.
///
/// # Examples
///
/// ```
/// use docsieve_llm::MockProvider;
/// use docsieve_domain::traits::LlmProvider;
///
/// let provider = MockProvider::sequence(["first", "second"]);
/// assert_eq!(provider.complete("p", None).unwrap(), "first");
/// assert_eq!(provider.complete("p", None).unwrap(), "second");
/// // Sequence exhausted: falls back to the last scripted response
/// assert_eq!(provider.complete("p", None).unwrap(), "second");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    script: Arc<Mutex<Vec<Scripted>>>,
    cursor: Arc<Mutex<usize>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a provider that returns the same response for every call.
    pub fn new(response: impl Into<String>) -> Self {
        Self::from_script(vec![Scripted::Response(response.into())])
    }

    /// Create a provider that returns each response in turn, then repeats the
    /// last one.
    pub fn sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script: Vec<Scripted> = responses
            .into_iter()
            .map(|r| Scripted::Response(r.into()))
            .collect();
        Self::from_script(script)
    }

    /// Create a provider that fails every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_script(vec![Scripted::Error(message.into())])
    }

    fn from_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
            cursor: Arc::new(Mutex::new(0)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Append a scripted response to the sequence.
    pub fn push_response(&self, response: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push(Scripted::Response(response.into()));
    }

    /// Append a scripted error to the sequence.
    pub fn push_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push(Scripted::Error(message.into()));
    }

    /// Get the number of times `complete` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let script = self.script.lock().unwrap();
        let mut cursor = self.cursor.lock().unwrap();

        let index = (*cursor).min(script.len().saturating_sub(1));
        *cursor += 1;

        match script.get(index) {
            Some(Scripted::Response(r)) => Ok(r.clone()),
            Some(Scripted::Error(msg)) => Err(LlmError::Other(msg.clone())),
            None => Err(LlmError::Other("Empty mock script".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_passthrough() {
        assert_eq!(extract_json(r#"{"key": "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_from_fenced_block() {
        let response = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_from_fence_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_unterminated_fence() {
        let response = "```json\n{\"key\": \"value\"}";
        assert_eq!(extract_json(response), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_fixed_response() {
        let provider = MockProvider::new("Test response");
        assert_eq!(provider.complete("any", None).unwrap(), "Test response");
        assert_eq!(provider.complete("other", None).unwrap(), "Test response");
    }

    #[test]
    fn test_sequenced_responses() {
        let provider = MockProvider::sequence(["a", "b", "c"]);
        assert_eq!(provider.complete("p", None).unwrap(), "a");
        assert_eq!(provider.complete("p", None).unwrap(), "b");
        assert_eq!(provider.complete("p", None).unwrap(), "c");
        // Repeats the last response when exhausted
        assert_eq!(provider.complete("p", None).unwrap(), "c");
    }

    #[test]
    fn test_scripted_error() {
        let provider = MockProvider::failing("backend down");
        let result = provider.complete("p", None);
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[test]
    fn test_mixed_script() {
        let provider = MockProvider::sequence(["ok"]);
        provider.push_error("transient");
        provider.push_response("recovered");

        assert!(provider.complete("p", None).is_ok());
        assert!(provider.complete("p", None).is_err());
        assert_eq!(provider.complete("p", None).unwrap(), "recovered");
    }

    #[test]
    fn test_call_count_shared_across_clones() {
        let provider1 = MockProvider::new("x");
        let provider2 = provider1.clone();

        provider1.complete("p", None).unwrap();
        provider2.complete("p", None).unwrap();

        assert_eq!(provider1.call_count(), 2);
        assert_eq!(provider2.call_count(), 2);
    }
}
