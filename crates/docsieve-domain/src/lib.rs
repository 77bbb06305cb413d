//! Docsieve Domain Layer
//!
//! This crate contains the data model shared by every stage of the document
//! extraction pipeline, plus the trait seams to external services.
//!
//! ## Key Concepts
//!
//! - **OcrResult**: normalized text + positioned text blocks from any OCR backend
//! - **DocType**: the fixed taxonomy (invoice, medical bill, prescription)
//! - **ExtractedField**: a named value with a confidence score, never empty
//! - **ExtractionResult**: the single output object a processed document yields
//!
//! ## Architecture
//!
//! Pipeline stages exclusively own their outputs: the OCR gateway produces an
//! immutable `OcrResult`, the consensus extractor produces `ExtractedField`s,
//! the confidence scorer rewrites each field's confidence exactly once, and the
//! validator only reads. Infrastructure implementations (HTTP OCR backends,
//! LLM providers) live in other crates behind the traits defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod doc_type;
pub mod field;
pub mod ocr;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use classification::DocumentClassification;
pub use doc_type::DocType;
pub use field::{BoundingBox, ExtractedField, FieldSource};
pub use ocr::{OcrResult, TextBlock};
pub use result::{ExtractionResult, QualityAssurance};
