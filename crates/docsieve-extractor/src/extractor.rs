//! Core consensus extractor implementation

use crate::config::ConsensusConfig;
use crate::consensus::reconcile;
use crate::error::ExtractorError;
use crate::parser::{parse_field_response, FieldCandidate};
use crate::prompt::{PromptBuilder, SYSTEM_INSTRUCTION};
use docsieve_domain::traits::LlmProvider;
use docsieve_domain::{DocType, ExtractedField};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Runs N independent extraction attempts and reconciles them by majority vote.
pub struct ConsensusExtractor<L> {
    provider: Arc<L>,
    config: ConsensusConfig,
}

impl<L> ConsensusExtractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new extractor.
    pub fn new(provider: L, config: ConsensusConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
        }
    }

    /// Extract structured fields from OCR text.
    ///
    /// Dispatches `consistency_runs` concurrent LLM calls with an identical
    /// prompt and votes over their candidates. A run that fails, times out,
    /// or replies with malformed JSON contributes nothing; all runs failing
    /// yields an empty field list rather than an error.
    ///
    /// # Errors
    ///
    /// Only text exceeding the configured maximum length is a hard error.
    pub async fn extract_fields(
        &self,
        doc_type: DocType,
        ocr_text: &str,
        custom_fields: Option<Vec<String>>,
    ) -> Result<Vec<ExtractedField>, ExtractorError> {
        if ocr_text.len() > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                ocr_text.len(),
                self.config.max_text_length,
            ));
        }

        let mut builder = PromptBuilder::new(doc_type, ocr_text);
        if let Some(fields) = custom_fields {
            builder = builder.with_fields(fields);
        }
        let prompt = Arc::new(builder.build());

        info!(
            doc_type = doc_type.as_str(),
            runs = self.config.consistency_runs,
            text_len = ocr_text.len(),
            "starting consensus extraction"
        );

        // Dispatch all runs concurrently; collect in run order so voting
        // tie-breaks stay deterministic
        let handles: Vec<_> = (0..self.config.consistency_runs)
            .map(|run_idx| {
                let provider = Arc::clone(&self.provider);
                let prompt = Arc::clone(&prompt);
                let run_timeout = self.config.run_timeout();
                let default_confidence = self.config.default_confidence;

                tokio::spawn(async move {
                    single_run(provider, prompt, run_idx, run_timeout, default_confidence).await
                })
            })
            .collect();

        let mut runs = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(candidates) => runs.push(candidates),
                Err(e) => {
                    warn!(error = %e, "extraction run task panicked, counting as empty");
                    runs.push(Vec::new());
                }
            }
        }

        let attempted: usize = runs.iter().map(|r| r.len()).sum();
        let fields = reconcile(runs);

        info!(
            candidates = attempted,
            fields = fields.len(),
            "consensus extraction complete"
        );

        Ok(fields)
    }
}

/// One extraction attempt. Every failure path degrades to an empty candidate
/// list so sibling runs keep voting.
async fn single_run<L>(
    provider: Arc<L>,
    prompt: Arc<String>,
    run_idx: u32,
    run_timeout: std::time::Duration,
    default_confidence: f64,
) -> Vec<FieldCandidate>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let call = tokio::task::spawn_blocking(move || {
        provider
            .complete(&prompt, Some(SYSTEM_INSTRUCTION))
            .map_err(|e| e.to_string())
    });

    let response = match timeout(run_timeout, call).await {
        Err(_) => {
            warn!(run = run_idx, "extraction run timed out");
            return Vec::new();
        }
        Ok(Err(join_error)) => {
            warn!(run = run_idx, error = %join_error, "extraction run task failed");
            return Vec::new();
        }
        Ok(Ok(Err(llm_error))) => {
            warn!(run = run_idx, error = %llm_error, "LLM call failed");
            return Vec::new();
        }
        Ok(Ok(Ok(response))) => response,
    };

    match parse_field_response(&response, default_confidence) {
        Ok(candidates) => {
            debug!(run = run_idx, candidates = candidates.len(), "run parsed");
            candidates
        }
        Err(e) => {
            warn!(run = run_idx, error = %e, "malformed extraction response");
            Vec::new()
        }
    }
}
