//! Deterministic OCR backend for testing

use crate::{OcrBackend, OcrError};
use docsieve_domain::{BoundingBox, OcrResult, TextBlock};
use std::sync::{Arc, Mutex};

/// Mock OCR backend returning a canned result or scripted error.
///
/// # Examples
///
/// ```
/// use docsieve_ocr::{MockOcrBackend, OcrBackend};
///
/// let backend = MockOcrBackend::with_text("Invoice #INV-001");
/// let result = backend.process(b"bytes", "image/png").unwrap();
/// assert_eq!(result.full_text, "Invoice #INV-001");
/// ```
#[derive(Clone)]
pub struct MockOcrBackend {
    result: OcrResult,
    fail_with: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockOcrBackend {
    /// Create a backend returning the given result.
    pub fn new(result: OcrResult) -> Self {
        Self {
            result,
            fail_with: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a backend returning the given text with one synthetic block.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let blocks = text
            .split_whitespace()
            .map(|word| TextBlock {
                text: word.to_string(),
                confidence: 0.9,
                bbox: BoundingBox::from_ltwh(0, 0, 10 * word.len() as i32, 12),
                page: 1,
            })
            .collect();

        Self::new(OcrResult {
            full_text: text,
            text_blocks: blocks,
            page: Some(1),
            pages: None,
            confidence: 0.9,
            engine: "mock".to_string(),
            errors: None,
        })
    }

    /// Create a backend that fails every call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: OcrResult::default(),
            fail_with: Some(message.into()),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Get the number of times `process` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl OcrBackend for MockOcrBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn process(&self, bytes: &[u8], _mime_type: &str) -> Result<OcrResult, OcrError> {
        *self.call_count.lock().unwrap() += 1;

        if bytes.is_empty() {
            return Err(OcrError::EmptyInput);
        }
        if let Some(message) = &self.fail_with {
            return Err(OcrError::Backend(message.clone()));
        }
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_text_builds_blocks() {
        let backend = MockOcrBackend::with_text("Total: $450.00");
        let result = backend.process(b"x", "image/png").unwrap();
        assert_eq!(result.text_blocks.len(), 2);
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_failing_backend() {
        let backend = MockOcrBackend::failing("service down");
        assert!(matches!(
            backend.process(b"x", "image/png"),
            Err(OcrError::Backend(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let backend = MockOcrBackend::with_text("text");
        assert!(matches!(
            backend.process(b"", "image/png"),
            Err(OcrError::EmptyInput)
        ));
    }
}
