//! Keyword-scoring text classifier

use docsieve_domain::doc_type::ALL_DOC_TYPES;
use docsieve_domain::{DocType, DocumentClassification};
use tracing::debug;

/// Classify OCR text by counting per-type keyword occurrences.
///
/// The type with the highest raw count wins; ties fall to the earliest type
/// in the fixed enumeration order (medical_bill, prescription, invoice).
pub fn classify_text(text: &str) -> DocType {
    let lowercased = text.to_lowercase();

    let mut best = DocType::default();
    let mut best_score = -1i64;

    for doc_type in ALL_DOC_TYPES {
        let score = keyword_score(&lowercased, doc_type);
        debug!(doc_type = doc_type.as_str(), score, "keyword score");
        if score > best_score {
            best = doc_type;
            best_score = score;
        }
    }

    best
}

/// Classify OCR text, returning the full classification with a rationale.
///
/// The keyword scorer has no calibrated confidence; it reports a flat 0.5.
pub fn classify_text_detailed(text: &str) -> DocumentClassification {
    let lowercased = text.to_lowercase();
    let doc_type = classify_text(text);
    let score = keyword_score(&lowercased, doc_type);

    DocumentClassification {
        doc_type,
        confidence: 0.5,
        reasoning: format!(
            "Keyword classification: {} matched {} keyword(s)",
            doc_type, score
        ),
    }
}

/// Number of this type's keywords present in the lowercased text.
fn keyword_score(lowercased: &str, doc_type: DocType) -> i64 {
    doc_type
        .keywords()
        .iter()
        .filter(|kw| lowercased.contains(*kw))
        .count() as i64
}
