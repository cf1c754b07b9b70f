//! Core Analyzer implementation

use crate::chunking::TextChunker;
use crate::client::ClauseExtractionClient;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::parse_llm_response;
use crate::types::{AnalysisMetadata, AnalysisOutcome};
use clausecheck_domain::traits::LlmProvider;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Analyzer turns document text into an ordered list of findings
///
/// Chunks are sent to the LLM one at a time, in order. A failed LLM call
/// aborts the whole analysis; an unreadable response only drops that chunk's
/// findings.
pub struct Analyzer<L: LlmProvider> {
    client: ClauseExtractionClient<L>,
    config: AnalyzerConfig,
}

impl<L: LlmProvider> Analyzer<L> {
    /// Create a new Analyzer
    pub fn new(llm_provider: L, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        Self::with_shared_provider(Arc::new(llm_provider), config)
    }

    /// Create a new Analyzer around an already shared provider
    pub fn with_shared_provider(
        llm_provider: Arc<L>,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalyzerError> {
        config.validate().map_err(AnalyzerError::Config)?;
        Ok(Self {
            client: ClauseExtractionClient::new(llm_provider),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The LLM provider behind this analyzer
    pub fn provider(&self) -> &L {
        self.client.provider()
    }

    /// Analyze document text
    pub async fn analyze(&self, text: &str) -> Result<AnalysisOutcome, AnalyzerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzerError::EmptyText);
        }

        let text_length = text.chars().count();
        let start_time = Instant::now();
        let chunks = TextChunker::new(self.config.max_chunk_size).chunk(text);
        let total = chunks.len();

        info!("Analyzing {} chars in {} chunk(s)", text_length, total);

        let mut findings = Vec::new();
        let mut unparsed_chunks = 0;

        for (idx, chunk) in chunks.iter().enumerate() {
            let index = idx + 1;
            debug!("Processing chunk {}/{}", index, total);

            let response = self.client.extract(chunk, index, total).await?;
            let parsed = parse_llm_response(&response);

            if parsed.is_failed() {
                warn!("Chunk {}/{} produced no readable findings", index, total);
                unparsed_chunks += 1;
            }

            debug!("Chunk {}/{}: {} findings", index, total, parsed.findings.len());
            findings.extend(parsed.findings);
        }

        let metadata = AnalysisMetadata {
            chunk_count: total,
            unparsed_chunks,
            model_name: self.provider().model_name().to_string(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Analysis complete: {} findings from {} chunk(s), {} unparsed",
            findings.len(),
            total,
            unparsed_chunks
        );

        Ok(AnalysisOutcome { findings, metadata })
    }
}
