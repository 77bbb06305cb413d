//! Pipeline assembly from environment configuration.

use crate::error::{CliError, Result};
use docsieve_classifier::Classifier;
use docsieve_extractor::{ConsensusConfig, ConsensusExtractor};
use docsieve_llm::OpenAiProvider;
use docsieve_ocr::{OcrGateway, OcrSpaceBackend};
use docsieve_pipeline::Pipeline;
use std::env;

const DEFAULT_MODEL: &str = "gpt-4o-mini";

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| CliError::Config(format!("{name} is not set")))
}

fn model() -> String {
    env::var("DOCSIEVE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
}

/// The OCR fallback chain configured from the environment.
pub fn build_gateway() -> Result<OcrGateway> {
    let ocr_key = require_env("OCRSPACE_API_KEY")?;
    Ok(OcrGateway::new().with_backend(OcrSpaceBackend::new(ocr_key)))
}

/// Classifier with or without the vision strategy.
pub fn build_classifier(no_vision: bool) -> Result<Classifier<OpenAiProvider>> {
    if no_vision {
        return Ok(Classifier::text_only());
    }
    let api_key = require_env("OPENAI_API_KEY")?;
    Ok(Classifier::with_vision(OpenAiProvider::new(api_key, model())))
}

/// The full pipeline: OCR, classification, consensus extraction.
pub fn build_pipeline(no_vision: bool) -> Result<Pipeline<OpenAiProvider>> {
    let api_key = require_env("OPENAI_API_KEY")?;
    let extractor = ConsensusExtractor::new(
        OpenAiProvider::new(api_key, model()),
        ConsensusConfig::default(),
    );
    Ok(Pipeline::new(
        build_gateway()?,
        build_classifier(no_vision)?,
        extractor,
    ))
}

/// Guess a MIME type from the file extension; OCR backends only need the
/// image/PDF distinction.
pub fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
