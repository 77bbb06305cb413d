//! Document classification output

use crate::doc_type::DocType;
use serde::{Deserialize, Serialize};

/// Result of classifying a document into the fixed taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentClassification {
    /// The chosen document type
    pub doc_type: DocType,
    /// Classifier confidence, in [0.0, 1.0]
    pub confidence: f64,
    /// Human-readable rationale from the classifier
    pub reasoning: String,
}

impl DocumentClassification {
    /// The fallback classification used when a classifier fails outright.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            doc_type: DocType::Invoice,
            confidence: 0.5,
            reasoning: reason.into(),
        }
    }
}
