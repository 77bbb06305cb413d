//! LLM prompt engineering for field extraction

use docsieve_domain::DocType;

/// System instruction sent with every extraction run.
pub(crate) const SYSTEM_INSTRUCTION: &str = "You are an expert document extraction system. \
Extract information accurately and assign confidence scores. \
Never return null or empty values for field values.";

/// Builds the extraction prompt for one document.
///
/// Every run of the consensus loop uses the identical prompt; disagreement
/// between runs comes from model non-determinism alone.
pub struct PromptBuilder {
    doc_type: DocType,
    text: String,
    fields: Vec<String>,
}

impl PromptBuilder {
    /// Create a builder using the document type's default field vocabulary.
    pub fn new(doc_type: DocType, text: impl Into<String>) -> Self {
        Self {
            doc_type,
            text: text.into(),
            fields: doc_type
                .default_fields()
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }

    /// Replace the field vocabulary with caller-supplied names.
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        if !fields.is_empty() {
            self.fields = fields;
        }
        self
    }

    /// Build the complete extraction prompt.
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Extract the following fields from this {} document:\n\n",
            self.doc_type
        ));
        prompt.push_str(&format!("Fields to extract: {}\n\n", self.fields.join(", ")));

        prompt.push_str("Document text:\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n\n");

        prompt.push_str("Example output format:\n");
        prompt.push_str(few_shot_example(self.doc_type));
        prompt.push_str("\n\n");

        prompt.push_str(OUTPUT_RULES);
        prompt
    }
}

/// Worked example for the given document type.
fn few_shot_example(doc_type: DocType) -> &'static str {
    match doc_type {
        DocType::Invoice => {
            r#"{
    "fields": [
        {"name": "invoice_number", "value": "INV-2024-001", "confidence": 0.95},
        {"name": "total_amount", "value": "$1,250.00", "confidence": 0.92}
    ]
}"#
        }
        DocType::MedicalBill => {
            r#"{
    "fields": [
        {"name": "patient_name", "value": "John Smith", "confidence": 0.98},
        {"name": "total_amount", "value": "$450.00", "confidence": 0.90}
    ]
}"#
        }
        DocType::Prescription => {
            r#"{
    "fields": [
        {"name": "patient_name", "value": "Jane Doe", "confidence": 0.95},
        {"name": "medication", "value": "Lisinopril 10mg", "confidence": 0.93}
    ]
}"#
        }
    }
}

const OUTPUT_RULES: &str = r#"Extract the fields and return a JSON object with this structure:
{
    "fields": [
        {
            "name": "field_name",
            "value": "extracted_value",
            "confidence": 0.95
        }
    ]
}

IMPORTANT RULES:
1. NEVER use null, None, or empty strings for field values
2. Only extract fields that are clearly present in the text
3. If a field is not found, do NOT include it in the response
4. Assign confidence based on how clearly the value is stated
5. Use confidence 0.9+ for clearly stated values
6. Use confidence 0.7-0.9 for inferred values
7. Use confidence <0.7 for uncertain values
8. All field values must be non-empty strings
9. Confidence must be a number between 0 and 1

Return only valid JSON with non-empty field values."#;
