//! Stage 2 ranking types, ranking-response parsing, and Borda aggregation.
//!
//! Judges return free-form text; [`parse_ranking`] extracts an ordered label
//! list from it. Extraction is conservative: a response that does not yield
//! exactly the deliberation's label set is malformed and the ranking is
//! excluded from aggregation. [`aggregate_rankings`] then folds the valid
//! rankings into one deterministic consensus ordering.

use crate::core::model::Model;
use crate::council::anonymize::AnonymizationMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One judge's ordering of the anonymized answers, best to worst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage2Ranking {
    /// The model that judged
    pub judge: Model,
    /// Labels ordered best to worst; always exactly the deliberation's label set
    pub ranking: Vec<String>,
    /// The judge's full response, kept as justification
    pub rationale: String,
}

impl Stage2Ranking {
    pub fn new(judge: Model, ranking: Vec<String>, rationale: impl Into<String>) -> Self {
        Self {
            judge,
            ranking,
            rationale: rationale.into(),
        }
    }
}

/// Consensus score for one member, derived from all valid rankings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRanking {
    pub model: Model,
    pub score: f64,
}

/// Parse a judge's response into an ordered label list.
///
/// Preferred format is a final `RANKING:` line listing the labels best to
/// worst; as a fallback the whole response is scanned and labels are ordered
/// by first mention. Returns `None` unless the result covers exactly the
/// label set of `map` with no omissions, duplicates, or foreign labels.
pub fn parse_ranking(response: &str, map: &AnonymizationMap) -> Option<Vec<String>> {
    // Prefer the last line that declares a ranking
    let ranking_line = response
        .lines()
        .rev()
        .find(|line| line.to_uppercase().contains("RANKING"));

    if let Some(line) = ranking_line {
        let labels = labels_by_position(line, map);
        if map.covers_exactly(&labels) {
            return Some(labels);
        }
    }

    // Fallback: order labels by first mention anywhere in the response
    let labels = labels_by_position(response, map);
    if map.covers_exactly(&labels) {
        return Some(labels);
    }

    None
}

/// Known labels found in `text`, ordered by first occurrence
fn labels_by_position(text: &str, map: &AnonymizationMap) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = map
        .labels()
        .filter_map(|label| text.find(label).map(|pos| (pos, label)))
        .collect();
    found.sort_unstable_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, l)| l.to_string()).collect()
}

/// Fold Stage 2 rankings into a consensus ordering via Borda count.
///
/// Position k (1-indexed, best = 1) in a ranking of N labels contributes
/// `N - k + 1` points to the de-anonymized model at that position. Every
/// model in `map` gets exactly one entry, even when no judge ranked it.
/// Output is sorted by total descending; the sort is stable, so ties keep
/// the map's (roster) order and the result is reproducible for identical
/// inputs.
pub fn aggregate_rankings(
    stage2: &[Stage2Ranking],
    map: &AnonymizationMap,
) -> Vec<AggregateRanking> {
    let mut totals: Vec<AggregateRanking> = map
        .iter()
        .map(|(_, model)| AggregateRanking {
            model: model.clone(),
            score: 0.0,
        })
        .collect();

    for ranking in stage2 {
        let n = ranking.ranking.len();
        for (idx, label) in ranking.ranking.iter().enumerate() {
            let Some(model) = map.model_for(label) else {
                continue;
            };
            if let Some(entry) = totals.iter_mut().find(|e| &e.model == model) {
                entry.score += (n - idx) as f64;
            }
        }
    }

    totals.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    totals
}
