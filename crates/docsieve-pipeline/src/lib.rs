//! Docsieve Processing Pipeline
//!
//! Chains the stages into one document-in, result-out call:
//!
//! ```text
//! bytes → OCR gateway → classifier → consensus extractor → scorer → validator → ExtractionResult
//! ```
//!
//! Stage failures are absorbed at the smallest possible scope. The only hard
//! errors are unreadable input and a document with no extractable text at
//! all; everything downstream of OCR degrades to partial or empty output
//! that is still a well-formed result.

#![warn(missing_docs)]

mod error;

#[cfg(test)]
mod tests;

pub use error::PipelineError;

use docsieve_classifier::Classifier;
use docsieve_domain::traits::LlmProvider;
use docsieve_domain::{DocType, DocumentClassification, ExtractionResult, QualityAssurance};
use docsieve_extractor::ConsensusExtractor;
use docsieve_ocr::{OcrError, OcrGateway};
use docsieve_scorer::{ConfidenceScorer, ScoreContext};
use docsieve_validator::ValidationEngine;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fields at or above this confidence are safe to consume unreviewed.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Fields below this confidence should be treated as guesses.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Per-call knobs for [`Pipeline::process`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Extract these field names instead of the per-type defaults
    pub custom_fields: Option<Vec<String>>,
    /// Skip classification entirely and trust this type
    pub doc_type: Option<DocType>,
    /// Allow the vision classifier to see the page image
    pub enable_classification: bool,
    /// Run the validation rule engine
    pub enable_validation: bool,
    /// Fields scoring below this are flagged in the processing log
    pub confidence_threshold: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            custom_fields: None,
            doc_type: None,
            enable_classification: true,
            enable_validation: true,
            confidence_threshold: 0.7,
        }
    }
}

/// The assembled document processor.
///
/// Generic over the LLM provider so tests can run the full pipeline against
/// scripted responses.
pub struct Pipeline<L> {
    gateway: Arc<OcrGateway>,
    classifier: Arc<Classifier<L>>,
    extractor: ConsensusExtractor<L>,
    scorer: ConfidenceScorer,
    validator: ValidationEngine,
}

impl<L> Pipeline<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Assemble a pipeline from its configurable stages. Scoring and
    /// validation have no knobs and are built in.
    pub fn new(
        gateway: OcrGateway,
        classifier: Classifier<L>,
        extractor: ConsensusExtractor<L>,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            classifier: Arc::new(classifier),
            extractor,
            scorer: ConfidenceScorer::new(),
            validator: ValidationEngine::new(),
        }
    }

    /// Process one document end to end.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::EmptyInput`] for zero input bytes
    /// - [`PipelineError::NoText`] when OCR finds nothing to extract from
    /// - [`PipelineError::Extraction`] when the input text exceeds the
    ///   extractor's configured limit
    ///
    /// Zero extracted fields is not an error: the result carries an empty
    /// field list and an overall confidence of 0.0.
    #[instrument(skip_all, fields(mime = mime_type, bytes = bytes.len()))]
    pub async fn process(
        &self,
        bytes: &[u8],
        mime_type: &str,
        options: &PipelineOptions,
    ) -> Result<ExtractionResult, PipelineError> {
        if bytes.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let ocr = self.run_ocr(bytes.to_vec(), mime_type.to_string()).await?;
        if ocr.is_empty() {
            if let Some(errors) = &ocr.errors {
                warn!(?errors, "no text extracted");
            }
            return Err(PipelineError::NoText);
        }

        let classification = self.classify(bytes, mime_type, &ocr.full_text, options).await;
        info!(
            doc_type = classification.doc_type.as_str(),
            confidence = classification.confidence,
            "document classified"
        );

        let mut fields = self
            .extractor
            .extract_fields(
                classification.doc_type,
                &ocr.full_text,
                options.custom_fields.clone(),
            )
            .await?;

        // The one and only place field confidence is rewritten
        let ctx = ScoreContext {
            avg_ocr_confidence: ocr.avg_block_confidence(),
        };
        self.scorer.score_fields(&mut fields, &ctx);

        let scores: Vec<f64> = fields.iter().map(|f| f.confidence).collect();
        let overall_confidence = self.scorer.score_overall(&scores);

        let below_threshold = fields
            .iter()
            .filter(|f| f.confidence < options.confidence_threshold)
            .count();
        if below_threshold > 0 {
            warn!(
                count = below_threshold,
                threshold = options.confidence_threshold,
                "fields below confidence threshold"
            );
        }

        let qa = if options.enable_validation {
            self.validator.validate(classification.doc_type, &fields)
        } else {
            QualityAssurance::default()
        };

        info!(
            fields = fields.len(),
            overall = overall_confidence,
            failed_rules = qa.failed_rules.len(),
            "document processed"
        );

        Ok(ExtractionResult {
            doc_type: classification.doc_type,
            fields,
            overall_confidence,
            qa,
        })
    }

    /// OCR backends block on network IO, so the chain runs off the async
    /// executor.
    async fn run_ocr(
        &self,
        bytes: Vec<u8>,
        mime_type: String,
    ) -> Result<docsieve_domain::OcrResult, PipelineError> {
        let gateway = Arc::clone(&self.gateway);
        let result = tokio::task::spawn_blocking(move || gateway.process(&bytes, &mime_type))
            .await
            .map_err(|e| PipelineError::Ocr(OcrError::Backend(e.to_string())))??;
        Ok(result)
    }

    async fn classify(
        &self,
        bytes: &[u8],
        mime_type: &str,
        full_text: &str,
        options: &PipelineOptions,
    ) -> DocumentClassification {
        if let Some(doc_type) = options.doc_type {
            return DocumentClassification {
                doc_type,
                confidence: 1.0,
                reasoning: "document type supplied by caller".to_string(),
            };
        }

        // Vision only sees actual page images, and only when asked
        let image = if options.enable_classification && mime_type.starts_with("image/") {
            Some(bytes.to_vec())
        } else {
            None
        };

        let classifier = Arc::clone(&self.classifier);
        let text = full_text.to_string();
        match tokio::task::spawn_blocking(move || classifier.classify(image.as_deref(), &text))
            .await
        {
            Ok(classification) => classification,
            Err(e) => {
                warn!(error = %e, "classification task failed");
                DocumentClassification::fallback("classification task failed")
            }
        }
    }
}
