//! Page merging and confidence estimation

use docsieve_domain::{OcrResult, TextBlock};

/// Estimate a document-level confidence from the volume of recognized text.
///
/// Backends that report no usable document confidence get this heuristic:
/// substantial text is strong evidence the page was read correctly.
pub fn estimate_confidence(blocks: &[TextBlock]) -> f64 {
    if blocks.is_empty() {
        return 0.0;
    }

    let total_chars: usize = blocks.iter().map(|b| b.text.len()).sum();

    if total_chars > 100 {
        0.9
    } else if total_chars > 20 {
        0.8
    } else {
        0.7
    }
}

/// Merge per-page OCR results into one document-level result.
///
/// Texts are joined with newlines, blocks concatenated in page order, and
/// per-page errors collected as `"Page N: ..."` notes. The merged confidence
/// is re-estimated over the combined blocks.
pub fn merge_pages(page_results: Vec<OcrResult>) -> OcrResult {
    let pages = page_results.len() as u32;
    let engine = page_results
        .first()
        .map(|r| r.engine.clone())
        .unwrap_or_default();

    let mut texts = Vec::new();
    let mut all_blocks = Vec::new();
    let mut errors = Vec::new();

    for result in page_results {
        let page = result.page.unwrap_or(0);
        if let Some(page_errors) = result.errors {
            for e in page_errors {
                errors.push(format!("Page {}: {}", page, e));
            }
        }
        if !result.full_text.is_empty() {
            texts.push(result.full_text);
        }
        all_blocks.extend(result.text_blocks);
    }

    let confidence = estimate_confidence(&all_blocks);

    OcrResult {
        full_text: texts.join("\n"),
        text_blocks: all_blocks,
        page: None,
        pages: Some(pages),
        confidence,
        engine,
        errors: if errors.is_empty() { None } else { Some(errors) },
    }
}
