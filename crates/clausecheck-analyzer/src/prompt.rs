//! LLM prompt engineering for clause analysis

/// System instruction sent with every analysis request
pub const SYSTEM_INSTRUCTIONS: &str = r#"You are a legal contract analysis expert. Your task is to identify risky, unfavorable, or problematic clauses in contracts.

For each risky clause you find, provide:
1. clause_text: The exact problematic text from the contract
2. issue_detected: Brief title of the issue (e.g., "Unilateral Termination Clause", "Broad Non-Compete")
3. explanation: Plain language explanation of why this clause is risky or unfavorable
4. suggested_alternative: A more balanced or standard alternative clause
5. risk_level: "High", "Medium", or "Low"

Return your analysis as a JSON array of objects with these exact fields. Only include clauses that have genuine legal concerns. Focus on:
- Unilateral termination rights
- Overly broad non-compete or non-disclosure clauses
- Biased dispute resolution terms
- Unreasonable liability or indemnification clauses
- Payment terms heavily favoring one party
- Intellectual property overreach
- Excessive penalty clauses

If no problematic clauses are found, return an empty array."#;

/// Builds the per-chunk user prompt
pub struct PromptBuilder<'a> {
    chunk: &'a str,
    index: usize,
    total: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for chunk `index` (1-based) of `total`
    pub fn new(chunk: &'a str, index: usize, total: usize) -> Self {
        Self { chunk, index, total }
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.chunk.len() + 1024);

        prompt.push_str("Analyze the following contract text for risky or unfavorable clauses:\n\n");
        prompt.push_str(self.chunk);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT);
        prompt.push_str("\n\n");
        prompt.push_str(&format!(
            "If this is chunk {} of {}, focus on complete clauses only.",
            self.index, self.total
        ));

        prompt
    }
}

const OUTPUT_FORMAT: &str = r#"Return your analysis as a valid JSON array. Each risky clause should be an object with exactly these fields:
- clause_text: The exact problematic text
- issue_detected: Brief issue title
- explanation: Why it's risky in plain language
- suggested_alternative: Better alternative clause
- risk_level: "High", "Medium", or "Low""#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let prompt = PromptBuilder::new("The Contractor shall indemnify the Company.", 1, 1).build();
        assert!(prompt.contains("The Contractor shall indemnify the Company."));
    }

    #[test]
    fn test_prompt_includes_position() {
        let prompt = PromptBuilder::new("text", 2, 5).build();
        assert!(prompt.contains("chunk 2 of 5"));
    }

    #[test]
    fn test_prompt_includes_output_fields() {
        let prompt = PromptBuilder::new("text", 1, 1).build();
        for field in [
            "clause_text",
            "issue_detected",
            "explanation",
            "suggested_alternative",
            "risk_level",
        ] {
            assert!(prompt.contains(field), "missing field {}", field);
        }
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn test_system_instructions_mention_empty_array() {
        assert!(SYSTEM_INSTRUCTIONS.contains("return an empty array"));
    }
}
