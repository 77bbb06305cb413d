//! Docsieve Confidence Scorer
//!
//! Multi-factor confidence scoring for extracted fields. The raw confidence
//! an LLM reports is self-assessed and poorly calibrated, so the final score
//! blends four signals:
//!
//! - extraction confidence (0.4): what the consensus engine produced
//! - pattern match (0.3): does the value look right for the field name
//! - context consistency (0.2): is the value plausible (date ranges, amount
//!   magnitudes, name shape)
//! - OCR confidence (0.1): quality of the text the value came from
//!
//! Document-level confidence is a trimmed harmonic mean of the per-field
//! scores, which punishes a single weak field harder than an average would.
//!
//! # Example
//!
//! ```
//! use docsieve_scorer::{ConfidenceScorer, ScoreContext};
//!
//! let scorer = ConfidenceScorer::new();
//! let ctx = ScoreContext::default();
//! let score = scorer.score_field("total_amount", "$1,250.00", 0.92, &ctx);
//! assert!(score > 0.85);
//! ```

#![warn(missing_docs)]

mod consistency;
mod dates;
mod pattern;

use docsieve_domain::ExtractedField;
use pattern::PatternTable;
use tracing::debug;

const W_EXTRACTION: f64 = 0.4;
const W_PATTERN: f64 = 0.3;
const W_CONSISTENCY: f64 = 0.2;
const W_OCR: f64 = 0.1;

/// Per-document inputs the scorer needs beyond the field itself.
#[derive(Debug, Clone)]
pub struct ScoreContext {
    /// Mean OCR block confidence for the source document
    pub avg_ocr_confidence: f64,
}

impl Default for ScoreContext {
    fn default() -> Self {
        Self {
            avg_ocr_confidence: 0.8,
        }
    }
}

/// Weighted multi-factor field scorer.
///
/// Construction compiles the pattern table once; reuse the scorer across
/// documents.
pub struct ConfidenceScorer {
    patterns: PatternTable,
}

impl ConfidenceScorer {
    /// Create a scorer with the standard weights and pattern table.
    pub fn new() -> Self {
        Self {
            patterns: PatternTable::new(),
        }
    }

    /// Score a single field value, clamped to [0, 1].
    pub fn score_field(
        &self,
        field_name: &str,
        value: &str,
        base_confidence: f64,
        ctx: &ScoreContext,
    ) -> f64 {
        let pattern = self.patterns.pattern_confidence(field_name, value);
        let consistency = consistency::context_confidence(field_name, value);

        let weighted = base_confidence * W_EXTRACTION
            + pattern * W_PATTERN
            + consistency * W_CONSISTENCY
            + ctx.avg_ocr_confidence * W_OCR;

        weighted.clamp(0.0, 1.0)
    }

    /// Re-score every field in place, replacing the extraction confidence
    /// with the blended score.
    pub fn score_fields(&self, fields: &mut [ExtractedField], ctx: &ScoreContext) {
        for field in fields.iter_mut() {
            let scored = self.score_field(&field.name, &field.value, field.confidence, ctx);
            debug!(
                field = %field.name,
                raw = field.confidence,
                scored,
                "field rescored"
            );
            field.confidence = scored;
        }
    }

    /// Aggregate per-field scores into one document-level score.
    ///
    /// Zero scores are dropped, then with more than four survivors the
    /// extreme 10% at each end is trimmed (at least one from each side).
    /// The result is the harmonic mean of what remains, capped at 1.0.
    pub fn score_overall(&self, field_scores: &[f64]) -> f64 {
        let valid: Vec<f64> = field_scores.iter().copied().filter(|s| *s > 0.0).collect();
        if valid.is_empty() {
            return 0.0;
        }

        let trimmed: Vec<f64> = if valid.len() > 4 {
            let mut sorted = valid.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let trim = (sorted.len() / 10).max(1);
            sorted[trim..sorted.len() - trim].to_vec()
        } else {
            valid.clone()
        };

        if trimmed.is_empty() {
            return valid.iter().sum::<f64>() / valid.len() as f64;
        }

        let reciprocal_sum: f64 = trimmed.iter().map(|s| 1.0 / s.max(0.01)).sum();
        let harmonic = trimmed.len() as f64 / reciprocal_sum;
        harmonic.min(1.0)
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ConfidenceScorer {
        ConfidenceScorer::new()
    }

    #[test]
    fn test_well_formed_amount_scores_high() {
        let score = scorer().score_field("total_amount", "$1,250.00", 0.92, &ScoreContext::default());
        // 0.92*0.4 + 0.9*0.3 + 0.9*0.2 + 0.8*0.1 = 0.898
        assert!((score - 0.898).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_amount_scores_low() {
        let good = scorer().score_field("total_amount", "$450.00", 0.9, &ScoreContext::default());
        let bad = scorer().score_field("total_amount", "not a number", 0.9, &ScoreContext::default());
        assert!(bad < good);
    }

    #[test]
    fn test_score_clamped_to_unit_interval() {
        let ctx = ScoreContext {
            avg_ocr_confidence: 1.0,
        };
        let score = scorer().score_field("total_amount", "$100.00", 1.0, &ctx);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_ocr_quality_moves_the_score() {
        let s = scorer();
        let high = s.score_field("vendor_name", "Acme Corp", 0.9, &ScoreContext {
            avg_ocr_confidence: 0.95,
        });
        let low = s.score_field("vendor_name", "Acme Corp", 0.9, &ScoreContext {
            avg_ocr_confidence: 0.3,
        });
        assert!(high > low);
        assert!((high - low - 0.65 * W_OCR).abs() < 1e-9);
    }

    #[test]
    fn test_score_fields_rewrites_in_place() {
        let mut fields = vec![
            ExtractedField {
                name: "total_amount".to_string(),
                value: "$1,250.00".to_string(),
                confidence: 0.92,
                source: None,
            },
            ExtractedField {
                name: "invoice_number".to_string(),
                value: "INV-001".to_string(),
                confidence: 0.95,
                source: None,
            },
        ];

        scorer().score_fields(&mut fields, &ScoreContext::default());
        assert!((fields[0].confidence - 0.898).abs() < 1e-9);
        assert!(fields[1].confidence > 0.8);
    }

    #[test]
    fn test_overall_empty_is_zero() {
        assert_eq!(scorer().score_overall(&[]), 0.0);
    }

    #[test]
    fn test_overall_all_zero_is_zero() {
        assert_eq!(scorer().score_overall(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_overall_perfect_scores_stay_perfect() {
        let score = scorer().score_overall(&[1.0; 5]);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_harmonic_mean_small_set() {
        // Four scores: no trimming, plain harmonic mean
        let score = scorer().score_overall(&[0.8, 0.8, 0.8, 0.8]);
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_overall_punishes_one_weak_field() {
        let s = scorer();
        let harmonic = s.score_overall(&[0.9, 0.9, 0.1]);
        let arithmetic = (0.9 + 0.9 + 0.1) / 3.0;
        assert!(harmonic < arithmetic);
    }

    #[test]
    fn test_overall_trims_outliers_with_enough_scores() {
        // Six survivors: one trimmed from each end, so the 0.05 outlier
        // cannot drag the harmonic mean down
        let score = scorer().score_overall(&[0.05, 0.85, 0.85, 0.85, 0.85, 0.99]);
        assert!((score - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_overall_ignores_zeros_before_trimming() {
        let with_zeros = scorer().score_overall(&[0.0, 0.8, 0.9, 0.0]);
        let without = scorer().score_overall(&[0.8, 0.9]);
        assert!((with_zeros - without).abs() < 1e-9);
    }
}
