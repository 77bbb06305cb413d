//! Document type taxonomy
//!
//! The pipeline assumes a fixed taxonomy of three document types, each with a
//! bounded default field vocabulary and a keyword set used by the text
//! classifier fallback.

use serde::{Deserialize, Serialize};

/// The supported document types.
///
/// The declaration order (medical bill, prescription, invoice) doubles as the
/// tie-break order for keyword classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// Hospital bills, medical invoices, healthcare statements
    MedicalBill,
    /// Medical prescriptions, pharmacy receipts
    Prescription,
    /// Business invoices, receipts, bills for services or products
    Invoice,
}

/// All document types in classification tie-break order.
pub const ALL_DOC_TYPES: [DocType; 3] = [DocType::MedicalBill, DocType::Prescription, DocType::Invoice];

impl DocType {
    /// Get the type name as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Invoice => "invoice",
            DocType::MedicalBill => "medical_bill",
            DocType::Prescription => "prescription",
        }
    }

    /// Parse a type from its wire string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "invoice" => Some(DocType::Invoice),
            "medical_bill" => Some(DocType::MedicalBill),
            "prescription" => Some(DocType::Prescription),
            _ => None,
        }
    }

    /// The default field vocabulary extracted for this document type.
    pub fn default_fields(&self) -> &'static [&'static str] {
        match self {
            DocType::Invoice => &[
                "invoice_number",
                "date",
                "vendor_name",
                "customer_name",
                "total_amount",
                "subtotal",
                "tax_amount",
                "due_date",
            ],
            DocType::MedicalBill => &[
                "patient_name",
                "date_of_service",
                "provider_name",
                "total_amount",
                "insurance_amount",
                "patient_responsibility",
            ],
            DocType::Prescription => &[
                "patient_name",
                "doctor_name",
                "medication",
                "dosage",
                "quantity",
                "date_prescribed",
                "pharmacy_name",
            ],
        }
    }

    /// Keywords counted by the text classifier for this type.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DocType::MedicalBill => &[
                "patient",
                "medical",
                "hospital",
                "doctor",
                "physician",
                "clinic",
                "healthcare",
                "insurance",
                "copay",
                "deductible",
            ],
            DocType::Prescription => &[
                "prescription",
                "medication",
                "pharmacy",
                "rx",
                "dosage",
                "pills",
                "tablets",
                "mg",
                "refill",
            ],
            DocType::Invoice => &[
                "invoice",
                "bill",
                "receipt",
                "payment",
                "total",
                "subtotal",
                "tax",
                "amount",
                "due",
                "vendor",
            ],
        }
    }
}

impl Default for DocType {
    fn default() -> Self {
        DocType::Invoice
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for doc_type in ALL_DOC_TYPES {
            assert_eq!(DocType::parse(doc_type.as_str()), Some(doc_type));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(DocType::parse("tax_return"), None);
    }

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(DocType::Invoice.default_fields().len(), 8);
        assert_eq!(DocType::MedicalBill.default_fields().len(), 6);
        assert_eq!(DocType::Prescription.default_fields().len(), 7);
    }

    #[test]
    fn test_keyword_set_sizes() {
        assert_eq!(DocType::MedicalBill.keywords().len(), 10);
        assert_eq!(DocType::Prescription.keywords().len(), 9);
        assert_eq!(DocType::Invoice.keywords().len(), 10);
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&DocType::MedicalBill).unwrap();
        assert_eq!(json, "\"medical_bill\"");
        let parsed: DocType = serde_json::from_str("\"prescription\"").unwrap();
        assert_eq!(parsed, DocType::Prescription);
    }
}
