//! Analysis module - the persisted result of analyzing one document

use crate::Finding;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an analysis record based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability, matching `processed_at` ordering
/// - 128-bit uniqueness
/// - No coordination required for generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(uuid::Uuid);

impl AnalysisId {
    /// Generate a new UUIDv7-based AnalysisId
    ///
    /// # Examples
    ///
    /// ```
    /// use clausecheck_domain::AnalysisId;
    ///
    /// let id = AnalysisId::new();
    /// assert_eq!(id.to_string().len(), 36);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create an AnalysisId from a raw u128 value
    ///
    /// This is primarily for tests and storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }

    /// Parse an AnalysisId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use clausecheck_domain::AnalysisId;
    ///
    /// let id = AnalysisId::new();
    /// let parsed = AnalysisId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid analysis id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0.as_u128()
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The persisted result of one document analysis
///
/// Created once, after every chunk of the document has been analyzed, and never
/// mutated afterwards. Findings are ordered by chunk, then by the order the
/// oracle returned them within a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Unique identifier
    pub id: AnalysisId,

    /// Filename as supplied by the uploader
    pub filename: String,

    /// Ordered findings (may be empty)
    pub analysis_results: Vec<Finding>,

    /// When the analysis finished (UTC, RFC 3339 on the wire)
    pub processed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Create a new record with a fresh id, stamped with the current time
    ///
    /// The timestamp is kept at microsecond precision, which is what storage
    /// backends preserve.
    pub fn new(filename: impl Into<String>, analysis_results: Vec<Finding>) -> Self {
        Self {
            id: AnalysisId::new(),
            filename: filename.into(),
            analysis_results,
            processed_at: Utc::now().trunc_subsecs(6),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ordering is consistent with the underlying u128 value
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = AnalysisId::from_value(a);
            let id_b = AnalysisId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: round-trip through string representation preserves the id
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = AnalysisId::from_value(value);

            match AnalysisId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
