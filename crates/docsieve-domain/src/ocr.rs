//! Normalized OCR output

use crate::field::BoundingBox;
use serde::{Deserialize, Serialize};

/// A positioned unit of recognized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Recognized text, non-empty
    pub text: String,
    /// Backend confidence for this block, in [0.0, 1.0]
    pub confidence: f64,
    /// Pixel region on the page
    pub bbox: BoundingBox,
    /// 1-based page number
    pub page: u32,
}

/// Normalized output of an OCR pass over a document.
///
/// Produced once per document (or once per page and then merged) and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Concatenated recognized text
    pub full_text: String,
    /// Word or line level blocks with positions
    pub text_blocks: Vec<TextBlock>,
    /// Page number for single-page results
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub page: Option<u32>,
    /// Page count for merged multi-page results
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub pages: Option<u32>,
    /// Document-level confidence estimate, in [0.0, 1.0]
    pub confidence: f64,
    /// Name of the backend that produced this result
    pub engine: String,
    /// Per-page errors collected during processing, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl OcrResult {
    /// True when the pass yielded no usable text.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }

    /// Average block-level confidence, used as the OCR quality signal by the
    /// confidence scorer. Defaults to 0.8 when there are no blocks.
    pub fn avg_block_confidence(&self) -> f64 {
        if self.text_blocks.is_empty() {
            return 0.8;
        }
        let sum: f64 = self.text_blocks.iter().map(|b| b.confidence).sum();
        sum / self.text_blocks.len() as f64
    }
}
