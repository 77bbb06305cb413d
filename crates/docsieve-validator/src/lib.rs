//! Docsieve Validation Rule Engine
//!
//! Document-type-specific sanity checks that run after extraction. Rules are
//! advisory: they never block a result, they only populate the quality
//! assurance section so a downstream consumer (or a human) can decide what
//! to trust.
//!
//! Each document type has a fixed, ordered rule list. A rule sees the full
//! name-to-value field map, so it can check cross-field requirements. Rules
//! over optional fields pass vacuously when the field is absent; only
//! `patient_name` is required where it appears.
//!
//! # Example
//!
//! ```
//! use docsieve_validator::ValidationEngine;
//! use docsieve_domain::{DocType, ExtractedField};
//!
//! let engine = ValidationEngine::new();
//! let fields = vec![ExtractedField::new("invoice_number", "INV-001", 0.9)];
//!
//! let qa = engine.validate(DocType::Invoice, &fields);
//! assert!(qa.passed_rules.contains(&"invoice_number".to_string()));
//! ```

#![warn(missing_docs)]

mod rules;

use docsieve_domain::{DocType, ExtractedField, QualityAssurance};
use rules::{Rule, RulePatterns};
use std::collections::HashMap;
use tracing::debug;

/// Extraction confidence below this is flagged in the QA notes.
const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Runs the per-type rule lists and reports pass/fail plus notes.
pub struct ValidationEngine {
    patterns: RulePatterns,
}

impl ValidationEngine {
    /// Create an engine with the standard rule sets.
    pub fn new() -> Self {
        Self {
            patterns: RulePatterns::new(),
        }
    }

    /// Validate extracted fields against the rules for `doc_type`.
    ///
    /// Every rule runs even if an earlier one fails or errors. A rule error
    /// (a pattern that could not be evaluated) is recorded as
    /// `<rule>_error` in the failed list with a diagnostic note.
    pub fn validate(&self, doc_type: DocType, fields: &[ExtractedField]) -> QualityAssurance {
        let mut passed_rules = Vec::new();
        let mut failed_rules = Vec::new();
        let mut notes = Vec::new();

        // Last write wins on duplicate names
        let field_map: HashMap<&str, &str> = fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect();

        for rule in Rule::for_doc_type(doc_type) {
            match rule.apply(&self.patterns, &field_map) {
                Ok(true) => passed_rules.push(rule.name().to_string()),
                Ok(false) => failed_rules.push(rule.name().to_string()),
                Err(reason) => {
                    failed_rules.push(format!("{}_error", rule.name()));
                    notes.push(format!("Validation error in {}: {}", rule.name(), reason));
                }
            }
        }

        let low_confidence = fields
            .iter()
            .filter(|f| f.confidence < LOW_CONFIDENCE_THRESHOLD)
            .count();
        if low_confidence > 0 {
            notes.push(format!("{low_confidence} low-confidence fields"));
        }

        debug!(
            doc_type = doc_type.as_str(),
            passed = passed_rules.len(),
            failed = failed_rules.len(),
            "validation complete"
        );

        QualityAssurance {
            passed_rules,
            failed_rules,
            notes: notes.join("; "),
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: &str, confidence: f64) -> ExtractedField {
        ExtractedField::new(name, value, confidence)
    }

    #[test]
    fn test_clean_invoice_passes_all_rules() {
        let fields = vec![
            field("invoice_number", "INV-2024-001", 0.9),
            field("total_amount", "$1,250.00", 0.9),
            field("date", "01/15/2024", 0.85),
        ];

        let qa = ValidationEngine::new().validate(DocType::Invoice, &fields);
        assert_eq!(
            qa.passed_rules,
            vec!["invoice_number", "amount_format", "date_format"]
        );
        assert!(qa.failed_rules.is_empty());
        assert!(qa.notes.is_empty());
    }

    #[test]
    fn test_bad_amount_fails_amount_rule_only() {
        let fields = vec![
            field("invoice_number", "INV-001", 0.9),
            field("total_amount", "lots of money", 0.9),
        ];

        let qa = ValidationEngine::new().validate(DocType::Invoice, &fields);
        assert!(qa.passed_rules.contains(&"invoice_number".to_string()));
        assert_eq!(qa.failed_rules, vec!["amount_format"]);
    }

    #[test]
    fn test_missing_optional_fields_pass_vacuously() {
        let qa = ValidationEngine::new().validate(DocType::Invoice, &[]);
        assert_eq!(
            qa.passed_rules,
            vec!["invoice_number", "amount_format", "date_format"]
        );
        assert!(qa.failed_rules.is_empty());
    }

    #[test]
    fn test_missing_patient_name_fails() {
        let fields = vec![field("total_amount", "$420.00", 0.9)];

        let qa = ValidationEngine::new().validate(DocType::MedicalBill, &fields);
        assert!(qa.failed_rules.contains(&"patient_name".to_string()));
        assert!(qa.passed_rules.contains(&"amount_format".to_string()));
    }

    #[test]
    fn test_prescription_rules() {
        let fields = vec![
            field("patient_name", "Jane Doe", 0.9),
            field("medication", "Amoxicillin 500mg", 0.9),
            field("doctor_name", "Dr. Smith", 0.9),
        ];

        let qa = ValidationEngine::new().validate(DocType::Prescription, &fields);
        assert_eq!(
            qa.passed_rules,
            vec!["patient_name", "medication_format", "doctor_name"]
        );
        assert!(qa.failed_rules.is_empty());
    }

    #[test]
    fn test_low_confidence_fields_noted() {
        let fields = vec![
            field("invoice_number", "INV-001", 0.4),
            field("total_amount", "$10.00", 0.55),
            field("date", "01/15/2024", 0.9),
        ];

        let qa = ValidationEngine::new().validate(DocType::Invoice, &fields);
        assert_eq!(qa.notes, "2 low-confidence fields");
    }

    #[test]
    fn test_numeric_patient_name_fails() {
        let fields = vec![field("patient_name", "Patient 12345", 0.9)];

        let qa = ValidationEngine::new().validate(DocType::Prescription, &fields);
        assert!(qa.failed_rules.contains(&"patient_name".to_string()));
    }

    #[test]
    fn test_duplicate_field_last_write_wins() {
        let fields = vec![
            field("total_amount", "garbage", 0.9),
            field("total_amount", "$99.00", 0.9),
        ];

        let qa = ValidationEngine::new().validate(DocType::Invoice, &fields);
        assert!(qa.passed_rules.contains(&"amount_format".to_string()));
    }
}
