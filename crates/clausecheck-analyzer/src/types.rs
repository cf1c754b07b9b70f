//! Result types for analysis

use clausecheck_domain::Finding;

/// Result of analyzing one document
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Findings in chunk order, then oracle order within a chunk
    pub findings: Vec<Finding>,

    /// Metadata about the analysis
    pub metadata: AnalysisMetadata,
}

/// Metadata about an analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisMetadata {
    /// Number of chunks sent to the LLM
    pub chunk_count: usize,

    /// Chunks whose response could not be parsed and contributed nothing
    pub unparsed_chunks: usize,

    /// Name of the LLM model used
    pub model_name: String,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
