//! Top-level extraction output

use crate::doc_type::DocType;
use crate::field::ExtractedField;
use serde::{Deserialize, Serialize};

/// Outcome of the validation rule engine, surfaced as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityAssurance {
    /// Names of rules that passed
    pub passed_rules: Vec<String>,
    /// Names of rules that failed
    pub failed_rules: Vec<String>,
    /// Free-form diagnostics, `;`-joined
    pub notes: String,
}

/// The unit of output for one processed document.
///
/// Created once when the pipeline completes, never mutated afterwards, and the
/// only thing persisted or exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Classified document type
    pub doc_type: DocType,
    /// Reconciled, scored fields
    pub fields: Vec<ExtractedField>,
    /// Document-level confidence, in [0.0, 1.0]
    pub overall_confidence: f64,
    /// Validation outcome
    pub qa: QualityAssurance,
}

impl ExtractionResult {
    /// Fields whose confidence clears the given threshold.
    pub fn high_confidence_fields(&self, threshold: f64) -> impl Iterator<Item = &ExtractedField> {
        self.fields.iter().filter(move |f| f.confidence > threshold)
    }
}
