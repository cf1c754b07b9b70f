//! Finding module - one flagged passage of a contract

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk classification of a finding
///
/// Serialized exactly as `"High"`, `"Medium"` or `"Low"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Clause is seriously one-sided or dangerous
    High,

    /// Clause is unfavorable but common
    #[default]
    Medium,

    /// Clause is worth a second look
    Low,
}

impl RiskLevel {
    /// Get the risk level name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }

    /// Parse a risk level, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(RiskLevel::High),
            "medium" => Some(RiskLevel::Medium),
            "low" => Some(RiskLevel::Low),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid risk level: {}", s))
    }
}

/// A flagged passage of a contract
///
/// Findings are immutable once created and are owned exclusively by the
/// [`AnalysisRecord`](crate::AnalysisRecord) they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Verbatim excerpt of the problematic clause
    pub clause_text: String,

    /// Short label for the issue (e.g. "Unilateral Termination Clause")
    pub issue_detected: String,

    /// Plain-language explanation of the risk
    pub explanation: String,

    /// A more balanced alternative wording
    pub suggested_alternative: String,

    /// Risk classification
    pub risk_level: RiskLevel,
}

impl Finding {
    /// Create a new finding
    pub fn new(
        clause_text: impl Into<String>,
        issue_detected: impl Into<String>,
        explanation: impl Into<String>,
        suggested_alternative: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            clause_text: clause_text.into(),
            issue_detected: issue_detected.into(),
            explanation: explanation.into(),
            suggested_alternative: suggested_alternative.into(),
            risk_level,
        }
    }
}
