//! Majority-vote reconciliation across extraction runs

use crate::parser::FieldCandidate;
use docsieve_domain::ExtractedField;
use tracing::debug;

/// A single vote for a field's value.
#[derive(Debug, Clone)]
struct FieldVote {
    value: String,
    confidence: f64,
}

/// Reconcile N runs' candidates into one field set by majority vote.
///
/// Votes are grouped by field name. For each name the most frequent exact
/// value wins; ties break to the value seen earliest (run order, then
/// candidate order within a run). The winner's confidence is the average
/// over matching votes, scaled by a consistency factor:
///
/// ```text
/// final = min(avg * (0.5 + 0.5 * matching/total), 1.0)
/// ```
///
/// so unanimous fields keep their raw confidence while minority proposals
/// are damped toward half of it.
pub(crate) fn reconcile(runs: Vec<Vec<FieldCandidate>>) -> Vec<ExtractedField> {
    // Group votes by field name, preserving first-seen order of names
    let mut grouped: Vec<(String, Vec<FieldVote>)> = Vec::new();

    for run in runs {
        for candidate in run {
            let vote = FieldVote {
                value: candidate.value,
                confidence: candidate.confidence,
            };
            match grouped.iter_mut().find(|(name, _)| *name == candidate.name) {
                Some((_, votes)) => votes.push(vote),
                None => grouped.push((candidate.name, vec![vote])),
            }
        }
    }

    let mut fields = Vec::new();

    for (name, votes) in grouped {
        let Some(winner) = winning_value(&votes) else {
            continue;
        };
        if winner.trim().is_empty() {
            continue;
        }

        let matching: Vec<&FieldVote> = votes.iter().filter(|v| v.value == winner).collect();
        let avg_confidence =
            matching.iter().map(|v| v.confidence).sum::<f64>() / matching.len() as f64;

        let consistency = matching.len() as f64 / votes.len() as f64;
        let final_confidence = (avg_confidence * (0.5 + 0.5 * consistency)).min(1.0);

        debug!(
            field = %name,
            value = %winner,
            votes = votes.len(),
            matching = matching.len(),
            confidence = final_confidence,
            "reconciled field"
        );

        fields.push(ExtractedField::new(name, winner, final_confidence));
    }

    fields
}

/// The most frequent value among the votes; ties go to the earliest seen.
fn winning_value(votes: &[FieldVote]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for vote in votes {
        match counts.iter_mut().find(|(value, _)| *value == vote.value) {
            Some((_, count)) => *count += 1,
            None => counts.push((&vote.value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        match best {
            // Strict inequality keeps the earliest value on ties
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }

    best.map(|(value, _)| value.to_string())
}
