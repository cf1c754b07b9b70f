//! ClauseCheck LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `clausecheck-domain`. It supports multiple LLM backends with a common interface.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use clausecheck_llm::MockProvider;
//! use clausecheck_domain::traits::LlmProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("[]");
//! let result = provider.generate("system", "test prompt").await.unwrap();
//! assert_eq!(result, "[]");
//! # });
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use clausecheck_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// API key missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Responses are selected by the first registered fragment contained in the prompt,
/// falling back to the default response.
///
/// # Examples
///
/// ```
/// use clausecheck_llm::MockProvider;
/// use clausecheck_domain::traits::LlmProvider;
///
/// # tokio_test::block_on(async {
/// let mut provider = MockProvider::default();
/// provider.add_response("termination", "[1]");
/// provider.add_response("payment", "[2]");
/// assert_eq!(provider.generate("", "the termination clause").await.unwrap(), "[1]");
/// assert_eq!(provider.generate("", "payment terms").await.unwrap(), "[2]");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, MockReply)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock".to_string(),
        }
    }

    /// Respond with `response` whenever the prompt contains `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.lock_responses()
            .push((fragment.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever the prompt contains `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.lock_responses().push((fragment.into(), MockReply::Error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.lock_prompts().len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.lock_prompts().clone()
    }

    /// Reset the recorded prompts and call count
    pub fn reset_call_count(&self) {
        self.lock_prompts().clear();
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, Vec<(String, MockReply)>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_prompts(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

#[async_trait]
impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, _system: &str, prompt: &str) -> Result<String, Self::Error> {
        self.lock_prompts().push(prompt.to_string());

        let reply = self
            .lock_responses()
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error) => Err(LlmError::Communication("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("sys", "any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("", "say hello").await.unwrap(), "world");
        assert_eq!(provider.generate("", "foo!").await.unwrap(), "bar");
        assert_eq!(provider.generate("", "unknown").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("", "prompt1").await.unwrap();
        provider.generate("", "prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad");

        let result = provider.generate("", "a bad prompt").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
        // Failed calls still count as a round-trip
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("", "test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
