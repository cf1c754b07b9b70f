//! Per-chunk oracle client

use crate::error::AnalyzerError;
use crate::prompt::{PromptBuilder, SYSTEM_INSTRUCTIONS};
use clausecheck_domain::traits::LlmProvider;
use std::sync::Arc;
use tracing::debug;

/// Sends one chunk to the LLM and returns its raw response
///
/// This is the only component that talks to the oracle. It performs exactly
/// one round-trip per call and does not look at the response.
pub struct ClauseExtractionClient<L: LlmProvider> {
    llm_provider: Arc<L>,
}

impl<L: LlmProvider> Clone for ClauseExtractionClient<L> {
    fn clone(&self) -> Self {
        Self {
            llm_provider: Arc::clone(&self.llm_provider),
        }
    }
}

impl<L: LlmProvider> ClauseExtractionClient<L> {
    /// Create a client around a provider
    pub fn new(llm_provider: Arc<L>) -> Self {
        Self { llm_provider }
    }

    /// The underlying provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Ask the LLM about chunk `index` (1-based) of `total`
    pub async fn extract(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
    ) -> Result<String, AnalyzerError> {
        let prompt = PromptBuilder::new(chunk, index, total).build();
        debug!("Chunk {}/{}: prompt length {} chars", index, total, prompt.len());

        let response = self
            .llm_provider
            .generate(SYSTEM_INSTRUCTIONS, &prompt)
            .await
            .map_err(|e| AnalyzerError::Transport {
                chunk: index,
                total,
                message: e.to_string(),
            })?;

        debug!("Chunk {}/{}: response length {} chars", index, total, response.len());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausecheck_llm::MockProvider;

    #[tokio::test]
    async fn test_extract_returns_raw_response() {
        let provider = Arc::new(MockProvider::new("not even json"));
        let client = ClauseExtractionClient::new(Arc::clone(&provider));

        let response = client.extract("some clause", 1, 1).await.unwrap();
        assert_eq!(response, "not even json");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_extract_sends_chunk_and_position() {
        let provider = Arc::new(MockProvider::default());
        let client = ClauseExtractionClient::new(Arc::clone(&provider));

        client.extract("indemnify and hold harmless", 3, 4).await.unwrap();

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("indemnify and hold harmless"));
        assert!(prompts[0].contains("chunk 3 of 4"));
    }

    #[tokio::test]
    async fn test_extract_maps_provider_failure() {
        let mut mock = MockProvider::default();
        mock.add_error("doomed");
        let provider = Arc::new(mock);
        let client = ClauseExtractionClient::new(Arc::clone(&provider));

        let result = client.extract("a doomed chunk", 2, 7).await;
        match result {
            Err(AnalyzerError::Transport { chunk, total, .. }) => {
                assert_eq!(chunk, 2);
                assert_eq!(total, 7);
            }
            other => panic!("Expected Transport error, got {:?}", other),
        }
        // No retry
        assert_eq!(provider.call_count(), 1);
    }
}
