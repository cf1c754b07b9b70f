//! ClauseCheck Domain Layer
//!
//! This crate contains the core domain model for ClauseCheck. It defines the
//! value objects produced by a contract analysis and the trait interfaces that
//! the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Finding**: One flagged passage of a contract with a risk classification
//! - **Risk Level**: High, Medium or Low
//! - **Analysis Record**: The persisted, immutable result of analyzing one document
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure data and business rules only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions (oracle, persistence)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod finding;
pub mod traits;

// Re-exports for convenience
pub use analysis::{AnalysisId, AnalysisRecord};
pub use finding::{Finding, RiskLevel};
