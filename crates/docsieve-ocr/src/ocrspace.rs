//! OCR.Space cloud backend
//!
//! Sends the document as a base64 data URI to the OCR.Space parse API and
//! normalizes its word overlay into `TextBlock`s. The service does not report
//! word-level confidence, so words carry a flat 0.9 and the document-level
//! confidence is estimated from text volume. PDFs come back as one parsed
//! result per page; those are normalized per page and merged.

use crate::merge::{estimate_confidence, merge_pages};
use crate::{OcrBackend, OcrError};
use base64::Engine as _;
use docsieve_domain::{BoundingBox, OcrResult, TextBlock};
use serde::Deserialize;
use std::time::Duration;

/// Default OCR.Space parse endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.ocr.space/parse/image";

/// Default request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Word-level confidence assigned to OCR.Space output, which carries none of
/// its own.
pub const WORD_CONFIDENCE: f64 = 0.9;

/// OCR.Space API backend.
pub struct OcrSpaceBackend {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ParseResponse {
    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored: bool,
    #[serde(rename = "ErrorMessage", default)]
    error_message: Vec<String>,
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Vec<ParsedResult>,
}

#[derive(Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    parsed_text: String,
    #[serde(rename = "TextOverlay")]
    text_overlay: Option<TextOverlay>,
}

#[derive(Deserialize)]
struct TextOverlay {
    #[serde(rename = "Lines", default)]
    lines: Vec<OverlayLine>,
}

#[derive(Deserialize)]
struct OverlayLine {
    #[serde(rename = "Words", default)]
    words: Vec<OverlayWord>,
}

#[derive(Deserialize)]
struct OverlayWord {
    #[serde(rename = "WordText")]
    word_text: String,
    #[serde(rename = "Left")]
    left: f64,
    #[serde(rename = "Top")]
    top: f64,
    #[serde(rename = "Width")]
    width: f64,
    #[serde(rename = "Height")]
    height: f64,
}

impl OcrSpaceBackend {
    /// Create a backend with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Point the backend at a non-default endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn normalize(&self, parsed: ParsedResult, page: u32) -> OcrResult {
        let mut blocks = Vec::new();

        if let Some(overlay) = parsed.text_overlay {
            for line in overlay.lines {
                for word in line.words {
                    blocks.push(TextBlock {
                        text: word.word_text,
                        confidence: WORD_CONFIDENCE,
                        bbox: BoundingBox::from_ltwh(
                            word.left as i32,
                            word.top as i32,
                            word.width as i32,
                            word.height as i32,
                        ),
                        page,
                    });
                }
            }
        }

        let confidence = estimate_confidence(&blocks);

        OcrResult {
            full_text: parsed.parsed_text,
            text_blocks: blocks,
            page: Some(page),
            pages: None,
            confidence,
            engine: "ocr.space".to_string(),
            errors: None,
        }
    }

    /// One parsed result per page comes back for PDFs; single images yield
    /// exactly one.
    fn normalize_results(&self, parsed_results: Vec<ParsedResult>) -> Result<OcrResult, OcrError> {
        let mut pages: Vec<OcrResult> = parsed_results
            .into_iter()
            .enumerate()
            .map(|(i, parsed)| self.normalize(parsed, i as u32 + 1))
            .collect();

        match pages.len() {
            0 => Err(OcrError::InvalidResponse("No parsed results".to_string())),
            1 => Ok(pages.remove(0)),
            _ => Ok(merge_pages(pages)),
        }
    }
}

impl OcrBackend for OcrSpaceBackend {
    fn name(&self) -> &str {
        "ocr.space"
    }

    fn process(&self, bytes: &[u8], mime_type: &str) -> Result<OcrResult, OcrError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        let data_uri = format!("data:{};base64,{}", mime_type, encoded);

        let form = [
            ("apikey", self.api_key.as_str()),
            ("language", "eng"),
            ("isOverlayRequired", "true"),
            ("base64Image", data_uri.as_str()),
            ("scale", "true"),
            ("OCREngine", "2"),
            ("isTable", "true"),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .map_err(|e| OcrError::Communication(format!("Request failed: {}", e)))?;

        let parsed: ParseResponse = response
            .json()
            .map_err(|e| OcrError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if parsed.is_errored {
            let message = if parsed.error_message.is_empty() {
                "Unknown error".to_string()
            } else {
                parsed.error_message.join("; ")
            };
            return Err(OcrError::Backend(message));
        }

        self.normalize_results(parsed.parsed_results)
    }
}
