//! Docsieve OCR Gateway
//!
//! Wraps one or more OCR backends behind a uniform interface and normalizes
//! their heterogeneous response shapes into `docsieve_domain::OcrResult`.
//!
//! # Architecture
//!
//! ```text
//! bytes + mime → OcrGateway → [backend 1, backend 2, ...] → OcrResult
//! ```
//!
//! The gateway tries backends in a fixed priority order and falls through on
//! failure or an empty-text result. Backend failures never propagate past the
//! gateway boundary; the caller decides what an empty result means.

#![warn(missing_docs)]

mod gateway;
mod merge;
mod mock;
mod ocrspace;

use docsieve_domain::OcrResult;
use thiserror::Error;

pub use gateway::OcrGateway;
pub use merge::{estimate_confidence, merge_pages};
pub use mock::MockOcrBackend;
pub use ocrspace::OcrSpaceBackend;

/// Errors that can occur during OCR operations
#[derive(Error, Debug)]
pub enum OcrError {
    /// Input bytes were empty or unreadable
    #[error("Empty or unreadable input")]
    EmptyInput,

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Backend reported a processing error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend response could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for OCR backends.
///
/// Implementations normalize whatever the underlying service returns (word
/// boxes as left/top/width/height, polygon vertices, per-page payloads) into
/// the uniform `OcrResult` shape.
pub trait OcrBackend {
    /// Stable backend name, recorded on results it produces.
    fn name(&self) -> &str;

    /// Run OCR over a document's raw bytes.
    fn process(&self, bytes: &[u8], mime_type: &str) -> Result<OcrResult, OcrError>;
}
