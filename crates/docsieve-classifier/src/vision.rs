//! Vision-LLM classifier

use base64::Engine as _;
use docsieve_domain::traits::LlmProvider;
use docsieve_domain::{DocType, DocumentClassification};
use docsieve_llm::extract_json;
use serde_json::Value;
use tracing::{debug, warn};

const CLASSIFY_INSTRUCTIONS: &str = r#"Analyze this document image and classify it as one of these types:
- invoice: Business invoices, receipts, bills for services/products
- medical_bill: Hospital bills, medical invoices, healthcare statements
- prescription: Medical prescriptions, pharmacy receipts

Look at headers, layout, terminology, and visual cues.

Respond with JSON in this exact format:
{
    "doc_type": "invoice|medical_bill|prescription",
    "confidence": 0.95,
    "reasoning": "Contains invoice number, vendor details, and line items typical of business invoices"
}"#;

/// Classifies a document from its page image via a vision-capable LLM.
///
/// Any failure (provider error, malformed JSON, unknown type string) degrades
/// to the default classification instead of an error.
pub struct VisionClassifier<L> {
    provider: L,
}

impl<L> VisionClassifier<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a classifier backed by the given provider.
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// Classify a document image.
    pub fn classify(&self, image: &[u8]) -> DocumentClassification {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let prompt = format!(
            "{}\n\nImage (base64 PNG):\ndata:image/png;base64,{}",
            CLASSIFY_INSTRUCTIONS, encoded
        );

        let response = match self.provider.complete(&prompt, None) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "vision classification failed, using default");
                return DocumentClassification::fallback(format!(
                    "Classification failed: {}, defaulting to invoice",
                    e
                ));
            }
        };

        match parse_classification(&response) {
            Some(classification) => classification,
            None => {
                warn!("vision classifier returned unusable JSON, using default");
                DocumentClassification::fallback(
                    "Classification failed: unparseable response, defaulting to invoice",
                )
            }
        }
    }
}

/// Parse the classifier's `{doc_type, confidence, reasoning}` reply.
///
/// The response is untrusted: each field is checked and coerced individually.
fn parse_classification(response: &str) -> Option<DocumentClassification> {
    let json: Value = serde_json::from_str(&extract_json(response)).ok()?;
    let obj = json.as_object()?;

    let doc_type = obj
        .get("doc_type")
        .and_then(|v| v.as_str())
        .and_then(DocType::parse)?;

    let confidence = obj
        .get("confidence")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    let reasoning = obj
        .get("reasoning")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    debug!(doc_type = doc_type.as_str(), confidence, "vision classification");

    Some(DocumentClassification {
        doc_type,
        confidence,
        reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsieve_llm::MockProvider;

    #[test]
    fn test_parses_valid_response() {
        let provider = MockProvider::new(
            r#"{"doc_type": "prescription", "confidence": 0.88, "reasoning": "Rx header and dosage lines"}"#,
        );
        let classifier = VisionClassifier::new(provider);
        let result = classifier.classify(b"png bytes");

        assert_eq!(result.doc_type, DocType::Prescription);
        assert_eq!(result.confidence, 0.88);
        assert!(result.reasoning.contains("Rx"));
    }

    #[test]
    fn test_parses_fenced_response() {
        let provider = MockProvider::new(
            "```json\n{\"doc_type\": \"invoice\", \"confidence\": 0.9, \"reasoning\": \"line items\"}\n```",
        );
        let classifier = VisionClassifier::new(provider);
        assert_eq!(classifier.classify(b"png").doc_type, DocType::Invoice);
    }

    #[test]
    fn test_provider_error_degrades_to_default() {
        let classifier = VisionClassifier::new(MockProvider::failing("model offline"));
        let result = classifier.classify(b"png");

        assert_eq!(result.doc_type, DocType::Invoice);
        assert_eq!(result.confidence, 0.5);
        assert!(result.reasoning.contains("model offline"));
    }

    #[test]
    fn test_malformed_json_degrades_to_default() {
        let classifier = VisionClassifier::new(MockProvider::new("I think it's an invoice"));
        let result = classifier.classify(b"png");
        assert_eq!(result.doc_type, DocType::Invoice);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_unknown_doc_type_degrades_to_default() {
        let provider =
            MockProvider::new(r#"{"doc_type": "tax_form", "confidence": 0.9, "reasoning": "w2"}"#);
        let classifier = VisionClassifier::new(provider);
        assert_eq!(classifier.classify(b"png").doc_type, DocType::Invoice);
    }

    #[test]
    fn test_confidence_clamped() {
        let provider =
            MockProvider::new(r#"{"doc_type": "invoice", "confidence": 1.7, "reasoning": "x"}"#);
        let classifier = VisionClassifier::new(provider);
        assert_eq!(classifier.classify(b"png").confidence, 1.0);
    }
}
