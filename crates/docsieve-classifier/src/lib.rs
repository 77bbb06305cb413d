//! Docsieve Document Classifier
//!
//! Maps a document to one of the fixed types (invoice, medical bill,
//! prescription) using two independent strategies:
//!
//! - a vision-LLM classifier over the page image, used when an image is
//!   available and the caller opts in;
//! - a keyword-scoring classifier over OCR text, used otherwise and as the
//!   fallback when the vision call fails.
//!
//! Classification never fails: vision errors degrade to a default
//! classification rather than propagating.

#![warn(missing_docs)]

mod text;
mod vision;

pub use text::{classify_text, classify_text_detailed};
pub use vision::VisionClassifier;

use docsieve_domain::traits::LlmProvider;
use docsieve_domain::DocumentClassification;

/// Facade choosing between the vision and text strategies.
pub struct Classifier<L> {
    vision: Option<VisionClassifier<L>>,
}

impl<L> Classifier<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a text-only classifier.
    pub fn text_only() -> Self {
        Self { vision: None }
    }

    /// Create a classifier that prefers the vision strategy.
    pub fn with_vision(provider: L) -> Self {
        Self {
            vision: Some(VisionClassifier::new(provider)),
        }
    }

    /// Classify a document.
    ///
    /// `image` carries the raw page image when available. The vision strategy
    /// is only consulted when both an image and a vision provider exist, and
    /// its failures degrade to the invoice/0.5 default rather than falling
    /// back to keywords. Without an image or provider, the keyword scorer
    /// over `ocr_text` decides.
    pub fn classify(&self, image: Option<&[u8]>, ocr_text: &str) -> DocumentClassification {
        if let (Some(vision), Some(image)) = (&self.vision, image) {
            return vision.classify(image);
        }
        classify_text_detailed(ocr_text)
    }
}
