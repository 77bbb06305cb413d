//! Parse LLM output into field candidates
//!
//! The LLM response is an untrusted external schema: each candidate is
//! validated and coerced field-by-field rather than trusting structural
//! decoding to succeed.

use crate::error::ExtractorError;
use docsieve_llm::extract_json;
use serde_json::Value;
use tracing::warn;

/// A raw field proposal from a single extraction run, before voting.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCandidate {
    /// Proposed field name, trimmed and non-empty
    pub name: String,
    /// Proposed value, trimmed and non-empty
    pub value: String,
    /// Run-level confidence, as reported by the model
    pub confidence: f64,
}

/// Parse one run's response into accepted candidates.
///
/// Expected shape: `{"fields": [{"name", "value", "confidence"}]}`.
/// Candidates failing coercion are skipped with a warning; a response that is
/// not JSON at all is an error the caller downgrades to an empty run.
pub(crate) fn parse_field_response(
    response: &str,
    default_confidence: f64,
) -> Result<Vec<FieldCandidate>, ExtractorError> {
    let json: Value = serde_json::from_str(&extract_json(response))
        .map_err(|e| ExtractorError::JsonParse(e.to_string()))?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    // A well-formed response with no extractable fields is legitimate
    let Some(fields_value) = obj.get("fields") else {
        return Ok(Vec::new());
    };

    let fields_array = fields_value
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("'fields' is not an array".to_string()))?;

    let mut candidates = Vec::new();
    for (idx, field_json) in fields_array.iter().enumerate() {
        match parse_candidate(field_json, default_confidence) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                warn!("Skipping field {}: {}", idx, e);
            }
        }
    }

    Ok(candidates)
}

/// Parse a single candidate from JSON, with explicit coercion rules.
fn parse_candidate(json: &Value, default_confidence: f64) -> Result<FieldCandidate, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "field is not a JSON object".to_string())?;

    let name = obj
        .get("name")
        .and_then(coerce_string)
        .ok_or_else(|| "missing or empty 'name'".to_string())?;

    let value = obj
        .get("value")
        .and_then(coerce_string)
        .ok_or_else(|| "missing or empty 'value'".to_string())?;

    let confidence = match obj.get("confidence") {
        None | Some(Value::Null) => default_confidence,
        Some(v) => coerce_f64(v).ok_or_else(|| "confidence does not coerce to a number".to_string())?,
    };

    Ok(FieldCandidate {
        name,
        value,
        confidence,
    })
}

/// Coerce a scalar JSON value to a trimmed, non-empty string.
fn coerce_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Coerce a JSON value (number or numeric string) to f64.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
