//! The individual rules and their per-type ordering.

use docsieve_domain::DocType;
use regex::Regex;
use std::collections::HashMap;

const AMOUNT_FIELDS: &[&str] = &["total_amount", "subtotal", "tax_amount"];
const DATE_FIELDS: &[&str] = &["date", "due_date", "date_of_service", "date_prescribed"];

/// One named validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    InvoiceNumber,
    AmountFormat,
    DateFormat,
    PatientName,
    MedicationFormat,
    DoctorName,
}

impl Rule {
    /// Rule list for a document type, in evaluation order.
    pub(crate) fn for_doc_type(doc_type: DocType) -> &'static [Rule] {
        match doc_type {
            DocType::Invoice => &[Rule::InvoiceNumber, Rule::AmountFormat, Rule::DateFormat],
            DocType::MedicalBill => &[Rule::PatientName, Rule::AmountFormat, Rule::DateFormat],
            DocType::Prescription => &[
                Rule::PatientName,
                Rule::MedicationFormat,
                Rule::DoctorName,
            ],
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Rule::InvoiceNumber => "invoice_number",
            Rule::AmountFormat => "amount_format",
            Rule::DateFormat => "date_format",
            Rule::PatientName => "patient_name",
            Rule::MedicationFormat => "medication_format",
            Rule::DoctorName => "doctor_name",
        }
    }

    /// Evaluate the rule against the name-to-value map.
    ///
    /// `Err` means the rule could not be evaluated at all, which the engine
    /// reports separately from a plain failure.
    pub(crate) fn apply(
        &self,
        patterns: &RulePatterns,
        fields: &HashMap<&str, &str>,
    ) -> Result<bool, String> {
        match self {
            Rule::InvoiceNumber => optional_field_matches(
                fields.get("invoice_number").copied(),
                &patterns.invoice_number,
            ),
            Rule::AmountFormat => all_present_match(fields, AMOUNT_FIELDS, &patterns.amount),
            Rule::DateFormat => all_present_match(fields, DATE_FIELDS, &patterns.date),
            Rule::PatientName => match fields.get("patient_name").copied() {
                None => Ok(false),
                Some(v) if v.is_empty() => Ok(false),
                Some(v) => check(&patterns.person_name, v),
            },
            Rule::MedicationFormat => {
                optional_field_matches(fields.get("medication").copied(), &patterns.medication)
            }
            Rule::DoctorName => {
                optional_field_matches(fields.get("doctor_name").copied(), &patterns.doctor_name)
            }
        }
    }
}

/// Compiled once per engine. Start-anchored: values must begin with the
/// expected shape, trailing extras are tolerated unless the pattern ends
/// with `$`.
pub(crate) struct RulePatterns {
    invoice_number: Option<Regex>,
    amount: Option<Regex>,
    date: Option<Regex>,
    person_name: Option<Regex>,
    medication: Option<Regex>,
    doctor_name: Option<Regex>,
}

impl RulePatterns {
    pub(crate) fn new() -> Self {
        Self {
            invoice_number: Regex::new(r"^[A-Z]*-?\d+").ok(),
            amount: Regex::new(r"^\$?\d{1,3}(?:,\d{3})*(?:\.\d{2})?").ok(),
            date: Regex::new(r"^(?:\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{2}-\d{2})").ok(),
            person_name: Regex::new(r"^[A-Za-z\s.]+$").ok(),
            medication: Regex::new(r"^[A-Za-z\s]+(?:\d+mg)?").ok(),
            doctor_name: Regex::new(r"^[A-Za-z\s.,]+$").ok(),
        }
    }
}

fn check(regex: &Option<Regex>, value: &str) -> Result<bool, String> {
    match regex {
        Some(re) => Ok(re.is_match(value)),
        None => Err("pattern failed to compile".to_string()),
    }
}

/// Absent or empty optional fields pass vacuously.
fn optional_field_matches(value: Option<&str>, regex: &Option<Regex>) -> Result<bool, String> {
    match value {
        None => Ok(true),
        Some(v) if v.is_empty() => Ok(true),
        Some(v) => check(regex, v),
    }
}

/// Every listed field that is present must match; absent fields are skipped.
fn all_present_match(
    fields: &HashMap<&str, &str>,
    names: &[&str],
    regex: &Option<Regex>,
) -> Result<bool, String> {
    for name in names {
        if let Some(value) = fields.get(name).copied() {
            if !check(regex, value)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map<'a>(entries: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_invoice_number_shapes() {
        let p = RulePatterns::new();
        for ok in ["INV-001", "12345", "A-9", "INV2024001"] {
            assert_eq!(
                Rule::InvoiceNumber.apply(&p, &map(&[("invoice_number", ok)])),
                Ok(true),
                "{ok} should pass"
            );
        }
        assert_eq!(
            Rule::InvoiceNumber.apply(&p, &map(&[("invoice_number", "no digits here")])),
            Ok(false)
        );
    }

    #[test]
    fn test_amount_rule_checks_every_present_amount_field() {
        let p = RulePatterns::new();
        let fields = map(&[("total_amount", "$100.00"), ("tax_amount", "bogus")]);
        assert_eq!(Rule::AmountFormat.apply(&p, &fields), Ok(false));
    }

    #[test]
    fn test_date_rule_accepts_iso_and_us_formats() {
        let p = RulePatterns::new();
        assert_eq!(Rule::DateFormat.apply(&p, &map(&[("date", "2024-01-15")])), Ok(true));
        assert_eq!(Rule::DateFormat.apply(&p, &map(&[("due_date", "1/15/24")])), Ok(true));
        assert_eq!(
            Rule::DateFormat.apply(&p, &map(&[("date_prescribed", "tomorrow")])),
            Ok(false)
        );
    }

    #[test]
    fn test_patient_name_is_required() {
        let p = RulePatterns::new();
        assert_eq!(Rule::PatientName.apply(&p, &map(&[])), Ok(false));
        assert_eq!(Rule::PatientName.apply(&p, &map(&[("patient_name", "")])), Ok(false));
        assert_eq!(
            Rule::PatientName.apply(&p, &map(&[("patient_name", "Jane Q. Doe")])),
            Ok(true)
        );
    }

    #[test]
    fn test_doctor_name_allows_commas() {
        let p = RulePatterns::new();
        assert_eq!(
            Rule::DoctorName.apply(&p, &map(&[("doctor_name", "Smith, John MD")])),
            Ok(true)
        );
    }

    #[test]
    fn test_medication_leading_letters() {
        let p = RulePatterns::new();
        assert_eq!(
            Rule::MedicationFormat.apply(&p, &map(&[("medication", "Amoxicillin 500mg")])),
            Ok(true)
        );
        assert_eq!(
            Rule::MedicationFormat.apply(&p, &map(&[("medication", "12345")])),
            Ok(false)
        );
    }
}
