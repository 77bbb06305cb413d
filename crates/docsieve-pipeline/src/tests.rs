//! Full-pipeline tests with scripted OCR and LLM stages.

use crate::{Pipeline, PipelineError, PipelineOptions};
use docsieve_classifier::Classifier;
use docsieve_domain::DocType;
use docsieve_extractor::{ConsensusConfig, ConsensusExtractor};
use docsieve_llm::MockProvider;
use docsieve_ocr::{MockOcrBackend, OcrGateway};

const INVOICE_TEXT: &str =
    "INVOICE invoice #INV-2024-001 Vendor: Acme Corp Total: $1,250.00 Due date: 03/15/2024";

fn invoice_pipeline(llm_response: &str) -> Pipeline<MockProvider> {
    let gateway = OcrGateway::new().with_backend(MockOcrBackend::with_text(INVOICE_TEXT));
    let provider = MockProvider::new(llm_response);
    let extractor = ConsensusExtractor::new(provider, ConsensusConfig::default());
    Pipeline::new(gateway, Classifier::text_only(), extractor)
}

#[tokio::test]
async fn test_invoice_end_to_end() {
    let response = r#"{
        "fields": [
            {"name": "invoice_number", "value": "INV-2024-001", "confidence": 0.95},
            {"name": "total_amount", "value": "$1,250.00", "confidence": 0.9},
            {"name": "date", "value": "03/15/2024", "confidence": 0.88}
        ]
    }"#;
    let pipeline = invoice_pipeline(response);

    let result = pipeline
        .process(b"scanned invoice", "image/png", &PipelineOptions::default())
        .await
        .unwrap();

    assert_eq!(result.doc_type, DocType::Invoice);
    assert_eq!(result.fields.len(), 3);
    assert!(result.overall_confidence > 0.7);

    // Scorer has rewritten the raw LLM confidences into blended scores
    for field in &result.fields {
        assert!((0.0..=1.0).contains(&field.confidence));
    }

    assert!(result.qa.passed_rules.contains(&"invoice_number".to_string()));
    assert!(result.qa.passed_rules.contains(&"amount_format".to_string()));
    assert!(result.qa.failed_rules.is_empty());
}

#[tokio::test]
async fn test_empty_input_rejected() {
    let pipeline = invoice_pipeline(r#"{"fields": []}"#);
    let result = pipeline
        .process(b"", "image/png", &PipelineOptions::default())
        .await;
    assert!(matches!(result, Err(PipelineError::EmptyInput)));
}

#[tokio::test]
async fn test_unreadable_document_is_no_text() {
    let gateway = OcrGateway::new().with_backend(MockOcrBackend::failing("scanner on fire"));
    let provider = MockProvider::new(r#"{"fields": []}"#);
    let extractor = ConsensusExtractor::new(provider, ConsensusConfig::default());
    let pipeline = Pipeline::new(gateway, Classifier::text_only(), extractor);

    let result = pipeline
        .process(b"bytes", "image/png", &PipelineOptions::default())
        .await;
    assert!(matches!(result, Err(PipelineError::NoText)));
}

#[tokio::test]
async fn test_all_llm_runs_failing_is_not_an_error() {
    let pipeline = invoice_pipeline("catastrophically not json");

    let result = pipeline
        .process(b"scanned invoice", "image/png", &PipelineOptions::default())
        .await
        .unwrap();

    assert!(result.fields.is_empty());
    assert_eq!(result.overall_confidence, 0.0);
}

#[tokio::test]
async fn test_doc_type_override_skips_classification() {
    // OCR text reads like an invoice, but the caller insists otherwise
    let response =
        r#"{"fields": [{"name": "patient_name", "value": "Jane Doe", "confidence": 0.9}]}"#;
    let pipeline = invoice_pipeline(response);

    let options = PipelineOptions {
        doc_type: Some(DocType::MedicalBill),
        ..Default::default()
    };
    let result = pipeline
        .process(b"scanned doc", "image/png", &options)
        .await
        .unwrap();

    assert_eq!(result.doc_type, DocType::MedicalBill);
    // Medical bill rules ran, not invoice rules
    assert!(result.qa.passed_rules.contains(&"patient_name".to_string()));
}

#[tokio::test]
async fn test_validation_can_be_disabled() {
    let response =
        r#"{"fields": [{"name": "total_amount", "value": "garbage", "confidence": 0.9}]}"#;
    let pipeline = invoice_pipeline(response);

    let options = PipelineOptions {
        enable_validation: false,
        ..Default::default()
    };
    let result = pipeline
        .process(b"scanned invoice", "image/png", &options)
        .await
        .unwrap();

    assert!(result.qa.passed_rules.is_empty());
    assert!(result.qa.failed_rules.is_empty());
}

#[tokio::test]
async fn test_custom_fields_flow_through() {
    let response = r#"{"fields": [{"name": "po_number", "value": "PO-42", "confidence": 0.85}]}"#;
    let pipeline = invoice_pipeline(response);

    let options = PipelineOptions {
        custom_fields: Some(vec!["po_number".to_string()]),
        ..Default::default()
    };
    let result = pipeline
        .process(b"scanned invoice", "image/png", &options)
        .await
        .unwrap();

    assert_eq!(result.fields.len(), 1);
    assert_eq!(result.fields[0].name, "po_number");
}

#[tokio::test]
async fn test_ocr_fallback_chain_feeds_extraction() {
    let gateway = OcrGateway::new()
        .with_backend(MockOcrBackend::failing("primary quota exceeded"))
        .with_backend(MockOcrBackend::with_text(INVOICE_TEXT));
    let response = r#"{"fields": [{"name": "invoice_number", "value": "INV-1", "confidence": 0.9}]}"#;
    let provider = MockProvider::new(response);
    let extractor = ConsensusExtractor::new(provider, ConsensusConfig::default());
    let pipeline = Pipeline::new(gateway, Classifier::text_only(), extractor);

    let result = pipeline
        .process(b"bytes", "image/png", &PipelineOptions::default())
        .await
        .unwrap();
    assert_eq!(result.fields[0].value, "INV-1");
}
