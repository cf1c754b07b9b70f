//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{AnalysisId, AnalysisRecord};
use async_trait::async_trait;

/// Trait for persisting finished analysis records
///
/// Implemented by the infrastructure layer (clausecheck-store)
pub trait AnalysisStore {
    /// Error type for store operations
    type Error;

    /// Persist a fully-formed record
    ///
    /// Must be atomic: either the record and all of its findings become
    /// visible, or nothing does.
    fn create(&mut self, record: &AnalysisRecord) -> Result<(), Self::Error>;

    /// Get records ordered by `processed_at` descending, at most `limit`
    fn list_recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, Self::Error>;

    /// Get a record by ID
    fn get_by_id(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, Self::Error>;

    /// Delete a record by ID, returning how many records were removed (0 or 1)
    fn delete_by_id(&mut self, id: &AnalysisId) -> Result<usize, Self::Error>;

    /// Check that the backing storage is reachable
    fn ping(&self) -> Result<(), Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (clausecheck-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a completion for `prompt` under the given system instruction
    ///
    /// One call is exactly one round-trip to the model. Implementations must
    /// not retry.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model answering requests
    fn model_name(&self) -> &str;
}
