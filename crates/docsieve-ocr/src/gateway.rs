//! Backend fallback chain

use crate::{OcrBackend, OcrError};
use docsieve_domain::OcrResult;
use tracing::{info, warn};

/// Tries OCR backends in a fixed priority order.
///
/// A backend is skipped when it errors or returns no text; the next one in
/// the chain gets a chance. When every backend has been exhausted the gateway
/// returns the last result it saw, annotated with the accumulated errors, so
/// the caller can distinguish "no text found" from "everything broke" without
/// the gateway ever raising past its boundary.
pub struct OcrGateway {
    backends: Vec<Box<dyn OcrBackend + Send + Sync>>,
}

impl OcrGateway {
    /// Create a gateway with no backends. Useless until `with_backend` is called.
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Append a backend to the fallback chain.
    pub fn with_backend(mut self, backend: impl OcrBackend + Send + Sync + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    /// Run the document through the chain.
    ///
    /// # Errors
    ///
    /// Only empty input bytes produce an error; backend failures degrade to an
    /// empty, error-annotated result instead.
    pub fn process(&self, bytes: &[u8], mime_type: &str) -> Result<OcrResult, OcrError> {
        if bytes.is_empty() {
            return Err(OcrError::EmptyInput);
        }

        let mut errors = Vec::new();
        let mut last_result: Option<OcrResult> = None;

        for backend in &self.backends {
            match backend.process(bytes, mime_type) {
                Ok(result) if !result.is_empty() => {
                    info!(engine = backend.name(), "OCR succeeded");
                    return Ok(result);
                }
                Ok(result) => {
                    warn!(engine = backend.name(), "OCR returned no text, falling through");
                    errors.push(format!("{}: no text extracted", backend.name()));
                    last_result = Some(result);
                }
                Err(e) => {
                    warn!(engine = backend.name(), error = %e, "OCR backend failed, falling through");
                    errors.push(format!("{}: {}", backend.name(), e));
                }
            }
        }

        let mut result = last_result.unwrap_or_default();
        if !errors.is_empty() {
            let mut all_errors = result.errors.take().unwrap_or_default();
            all_errors.extend(errors);
            result.errors = Some(all_errors);
        }
        Ok(result)
    }
}

impl Default for OcrGateway {
    fn default() -> Self {
        Self::new()
    }
}
