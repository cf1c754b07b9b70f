//! Parse LLM output into findings
//!
//! Oracle responses are untrusted free text. Parsing never fails: a response
//! that cannot be read yields zero findings and a warning.

use clausecheck_domain::{Finding, RiskLevel};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// How a response was decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// The whole trimmed response was a JSON array
    Direct,

    /// The array was cut out of surrounding text (first `[` to last `]`)
    BracketExtracted,

    /// Nothing usable was found
    Failed {
        /// Why both decoding attempts failed
        reason: String,
    },
}

/// Findings recovered from one oracle response
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Findings in the order the oracle returned them
    pub findings: Vec<Finding>,

    /// Which decoding stage produced them
    pub recovery: Recovery,
}

impl ParsedResponse {
    /// Whether the response degraded to zero findings
    pub fn is_failed(&self) -> bool {
        matches!(self.recovery, Recovery::Failed { .. })
    }
}

/// Parse an LLM response into findings
///
/// Valid JSON that is not an array yields zero findings; only text that is
/// not JSON at all goes through bracket extraction.
pub fn parse_llm_response(response: &str) -> ParsedResponse {
    let trimmed = response.trim();

    let reason = match decode(trimmed) {
        Decoded::Array(items) => {
            return ParsedResponse {
                findings: coerce_findings(items),
                recovery: Recovery::Direct,
            }
        }
        Decoded::NotArray(kind) => format!("Expected JSON array, got {}", kind),
        Decoded::Invalid(parse_error) => {
            if let Some(Decoded::Array(items)) = bracketed(trimmed).map(decode) {
                debug!("Recovered JSON array from surrounding text");
                return ParsedResponse {
                    findings: coerce_findings(items),
                    recovery: Recovery::BracketExtracted,
                };
            }
            parse_error
        }
    };

    warn!(
        "Could not parse LLM response as a JSON array ({}); response was: {}",
        reason,
        preview(trimmed)
    );

    ParsedResponse {
        findings: Vec::new(),
        recovery: Recovery::Failed { reason },
    }
}

/// Result of a strict JSON decode
enum Decoded {
    Array(Vec<Value>),
    NotArray(&'static str),
    Invalid(String),
}

fn decode(text: &str) -> Decoded {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Decoded::Array(items),
        Ok(other) => Decoded::NotArray(type_name(&other)),
        Err(e) => Decoded::Invalid(format!("JSON parse error: {}", e)),
    }
}

/// Slice from the first `[` to the last `]`, inclusive
fn bracketed(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

fn coerce_findings(items: Vec<Value>) -> Vec<Finding> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match item {
            Value::Object(obj) => Some(coerce_finding(&obj)),
            other => {
                debug!("Skipping element {}: not a JSON object ({})", idx, type_name(&other));
                None
            }
        })
        .collect()
}

/// Best-effort mapping of one JSON object to a finding
///
/// Missing text fields become empty; a missing or unknown risk level becomes
/// Medium.
fn coerce_finding(obj: &Map<String, Value>) -> Finding {
    let risk_level = obj
        .get("risk_level")
        .and_then(Value::as_str)
        .and_then(RiskLevel::parse)
        .unwrap_or_default();

    Finding {
        clause_text: text_field(obj, "clause_text"),
        issue_detected: text_field(obj, "issue_detected"),
        explanation: text_field(obj, "explanation"),
        suggested_alternative: text_field(obj, "suggested_alternative"),
        risk_level,
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 200;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        let head: String = text.chars().take(LIMIT).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FINDINGS: &str = r#"[
        {
            "clause_text": "The Company may terminate this agreement at any time.",
            "issue_detected": "Unilateral Termination Clause",
            "explanation": "Only one party may terminate.",
            "suggested_alternative": "Either party may terminate with 30 days notice.",
            "risk_level": "High"
        },
        {
            "clause_text": "Payment within 90 days.",
            "issue_detected": "Extended Payment Terms",
            "explanation": "Far beyond net-30.",
            "suggested_alternative": "Payment within 30 days.",
            "risk_level": "Low"
        }
    ]"#;

    #[test]
    fn test_parse_valid_json() {
        let parsed = parse_llm_response(TWO_FINDINGS);
        assert_eq!(parsed.recovery, Recovery::Direct);
        assert_eq!(parsed.findings.len(), 2);
        assert_eq!(parsed.findings[0].issue_detected, "Unilateral Termination Clause");
        assert_eq!(parsed.findings[0].risk_level, RiskLevel::High);
        assert_eq!(parsed.findings[1].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_well_formed_array_round_trips() {
        let findings = vec![
            Finding::new("a", "b", "c", "d", RiskLevel::High),
            Finding::new("e", "f", "g", "h", RiskLevel::Medium),
        ];
        let response = serde_json::to_string(&findings).unwrap();

        assert_eq!(parse_llm_response(&response).findings, findings);
    }

    #[test]
    fn test_parse_empty_array() {
        let parsed = parse_llm_response("  []  ");
        assert_eq!(parsed.recovery, Recovery::Direct);
        assert!(parsed.findings.is_empty());
        assert!(!parsed.is_failed());
    }

    #[test]
    fn test_parse_array_embedded_in_prose() {
        let response = format!(
            "Here is my analysis of the contract:\n{}\nLet me know if you need more.",
            TWO_FINDINGS
        );
        let parsed = parse_llm_response(&response);
        assert_eq!(parsed.recovery, Recovery::BracketExtracted);
        assert_eq!(parsed.findings.len(), 2);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = format!("```json\n{}\n```", TWO_FINDINGS);
        let parsed = parse_llm_response(&response);
        assert_eq!(parsed.recovery, Recovery::BracketExtracted);
        assert_eq!(parsed.findings.len(), 2);
    }

    #[test]
    fn test_parse_garbage() {
        let parsed = parse_llm_response("This is not JSON");
        assert!(parsed.is_failed());
        assert!(parsed.findings.is_empty());
    }

    #[test]
    fn test_parse_json_not_array() {
        let parsed = parse_llm_response(r#"{"clause_text": "x"}"#);
        assert!(parsed.is_failed());
        assert!(parsed.findings.is_empty());
    }

    #[test]
    fn test_object_wrapping_an_array_yields_nothing() {
        let parsed =
            parse_llm_response(r#"{"findings": [{"clause_text": "x", "risk_level": "High"}]}"#);
        assert!(parsed.is_failed());
        assert!(parsed.findings.is_empty());
    }

    #[test]
    fn test_parse_brackets_without_valid_array() {
        assert!(parse_llm_response("see [section 4] and [section 9]").is_failed());
        assert!(parse_llm_response("] backwards [").is_failed());
        assert!(parse_llm_response("").is_failed());
    }

    #[test]
    fn test_missing_fields_pass_through() {
        let parsed = parse_llm_response(r#"[{"clause_text": "Non-compete for 5 years"}]"#);
        assert_eq!(parsed.findings.len(), 1);

        let finding = &parsed.findings[0];
        assert_eq!(finding.clause_text, "Non-compete for 5 years");
        assert_eq!(finding.issue_detected, "");
        assert_eq!(finding.explanation, "");
        assert_eq!(finding.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_risk_level_is_normalized() {
        let parsed = parse_llm_response(
            r#"[{"risk_level": "high"}, {"risk_level": "LOW"}, {"risk_level": "catastrophic"}, {"risk_level": 3}]"#,
        );
        let levels: Vec<RiskLevel> = parsed.findings.iter().map(|f| f.risk_level).collect();
        assert_eq!(
            levels,
            vec![RiskLevel::High, RiskLevel::Low, RiskLevel::Medium, RiskLevel::Medium]
        );
    }

    #[test]
    fn test_non_string_fields_are_rendered() {
        let parsed = parse_llm_response(r#"[{"clause_text": 42, "explanation": null, "issue_detected": true}]"#);
        let finding = &parsed.findings[0];
        assert_eq!(finding.clause_text, "42");
        assert_eq!(finding.explanation, "");
        assert_eq!(finding.issue_detected, "true");
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let parsed = parse_llm_response(r#"["just a string", 7, {"clause_text": "kept"}, null]"#);
        assert_eq!(parsed.findings.len(), 1);
        assert_eq!(parsed.findings[0].clause_text, "kept");
    }

    #[test]
    fn test_bracketed_slice() {
        assert_eq!(bracketed("abc [1, 2] def"), Some("[1, 2]"));
        assert_eq!(bracketed("[a] and [b]"), Some("[a] and [b]"));
        assert_eq!(bracketed("no brackets"), None);
        assert_eq!(bracketed("] ["), None);
    }

    #[test]
    fn test_preview_truncates_long_responses() {
        let long = "x".repeat(500);
        assert_eq!(preview(&long).len(), 203);
        assert_eq!(preview("short"), "short");
    }
}
