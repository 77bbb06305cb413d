//! Docsieve Extraction Consensus Engine
//!
//! Converts OCR text into structured fields by running several independent
//! LLM extraction attempts and reconciling their disagreements.
//!
//! # Overview
//!
//! A single LLM extraction pass is cheap but unreliable: the model is
//! non-deterministic and occasionally hallucinates or drops fields. The
//! consensus engine runs the same extraction N times (default 3), then
//! majority-votes per field name. Agreement across runs boosts confidence;
//! a value proposed by only a minority of runs is damped toward half its
//! raw confidence.
//!
//! # Architecture
//!
//! ```text
//! OCR text → PromptBuilder → N concurrent LLM runs → parser → voting → ExtractedField*
//! ```
//!
//! # Failure model
//!
//! A run that fails, times out, or returns malformed JSON contributes zero
//! candidates; the remaining runs still vote. Only oversized input is a hard
//! error. All runs failing yields an empty field list, not an error.
//!
//! # Example
//!
//! ```
//! use docsieve_extractor::{ConsensusExtractor, ConsensusConfig};
//! use docsieve_domain::DocType;
//! use docsieve_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(
//!     r#"{"fields": [{"name": "invoice_number", "value": "INV-001", "confidence": 0.95}]}"#,
//! );
//! let extractor = ConsensusExtractor::new(llm, ConsensusConfig::default());
//!
//! let fields = extractor
//!     .extract_fields(DocType::Invoice, "Invoice #INV-001", None)
//!     .await?;
//! assert_eq!(fields[0].value, "INV-001");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod consensus;
mod error;
mod extractor;
mod parser;
mod prompt;


pub use config::ConsensusConfig;
pub use error::ExtractorError;
pub use extractor::ConsensusExtractor;
pub use parser::FieldCandidate;
pub use prompt::PromptBuilder;
