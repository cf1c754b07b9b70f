//! Error types for the Analyzer

use thiserror::Error;

/// Errors that can occur during analysis
///
/// Parse recovery is not represented here: an unreadable oracle response
/// degrades to zero findings for that chunk.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The document contained no text to analyze
    #[error("No text to analyze")]
    EmptyText,

    /// The oracle call for a chunk failed; the whole analysis is aborted
    #[error("LLM request failed on chunk {chunk} of {total}: {message}")]
    Transport {
        /// 1-based chunk index
        chunk: usize,
        /// Total number of chunks in the document
        total: usize,
        /// Provider error description
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// Whether the error is caused by the input rather than by a collaborator
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalyzerError::EmptyText)
    }
}
