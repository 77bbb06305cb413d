//! Pipeline error taxonomy

use docsieve_extractor::ExtractorError;
use docsieve_ocr::OcrError;
use thiserror::Error;

/// The hard failures a document can hit.
///
/// Everything else (a failed extraction run, a failed validation rule, a
/// dead OCR backend with a live fallback) degrades inside its own stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input bytes were empty
    #[error("Empty input: no document bytes provided")]
    EmptyInput,

    /// OCR produced no usable text
    #[error("No text could be extracted from the document")]
    NoText,

    /// The OCR stage itself failed hard
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    /// The extraction stage refused the input
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractorError),
}
