//! ClauseCheck Analyzer
//!
//! Turns contract text into structured risk findings using an LLM.
//!
//! # Overview
//!
//! The Analyzer is the document analysis pipeline. It splits text into
//! word-aligned chunks, asks the LLM about each chunk in order, recovers a
//! JSON array of findings from each free-form response, and concatenates the
//! results in chunk order.
//!
//! # Architecture
//!
//! ```text
//! Text → TextChunker → (per chunk) ClauseExtractionClient → LLM
//!                                   → parse_llm_response → Findings
//! ```
//!
//! # Failure Model
//!
//! - **Unreadable response**: that chunk contributes zero findings, analysis continues
//! - **LLM call fails**: the whole analysis fails, nothing is returned
//!
//! # Example Usage
//!
//! ```no_run
//! use clausecheck_analyzer::{Analyzer, AnalyzerConfig};
//! use clausecheck_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("[]");
//! let analyzer = Analyzer::new(llm, AnalyzerConfig::default())?;
//!
//! let outcome = analyzer.analyze("The Company may terminate at any time.").await?;
//!
//! println!("Findings: {}", outcome.findings.len());
//! println!("Chunks: {}", outcome.metadata.chunk_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod chunking;
mod client;
mod config;
mod error;
mod parser;
mod prompt;
mod types;


pub use analyzer::Analyzer;
pub use chunking::{TextChunker, DEFAULT_MAX_CHUNK_SIZE};
pub use client::ClauseExtractionClient;
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use parser::{parse_llm_response, ParsedResponse, Recovery};
pub use prompt::{PromptBuilder, SYSTEM_INSTRUCTIONS};
pub use types::{AnalysisMetadata, AnalysisOutcome};
