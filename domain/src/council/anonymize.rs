//! Anonymization mapping for Stage 2 cross-ranking.
//!
//! Judges must rank answers without knowing which member wrote which, so each
//! non-error Stage 1 response is assigned an opaque label ("Response A",
//! "Response B", ...) in roster order. The mapping is built once per
//! deliberation and threaded as an explicit value through ranking and
//! de-anonymization; it is never shared between deliberations and never
//! revealed to the judging models.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Bijective label <-> model mapping for one deliberation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationMap {
    entries: Vec<(String, Model)>,
}

impl AnonymizationMap {
    /// Assign sequential labels to the given models, preserving their order.
    ///
    /// Callers pass the non-error Stage 1 models in roster order so labels
    /// are deterministic for identical inputs.
    pub fn assign<'a, I>(models: I) -> Self
    where
        I: IntoIterator<Item = &'a Model>,
    {
        let entries = models
            .into_iter()
            .enumerate()
            .map(|(i, model)| (Self::label_at(i), model.clone()))
            .collect();
        Self { entries }
    }

    fn label_at(index: usize) -> String {
        // Rosters are small; letters run out only past 26 members.
        if index < 26 {
            format!("Response {}", (b'A' + index as u8) as char)
        } else {
            format!("Response {}", index + 1)
        }
    }

    /// The model behind a label, if the label belongs to this deliberation
    pub fn model_for(&self, label: &str) -> Option<&Model> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| m)
    }

    /// The label assigned to a model, if it has one
    pub fn label_for(&self, model: &Model) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, m)| m == model)
            .map(|(l, _)| l.as_str())
    }

    /// Labels in assignment order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// (label, model) pairs in assignment order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.entries.iter().map(|(l, m)| (l.as_str(), m))
    }

    /// Whether `labels` is exactly this map's label set (order-insensitive)
    pub fn covers_exactly(&self, labels: &[String]) -> bool {
        labels.len() == self.entries.len()
            && labels.iter().all(|l| self.model_for(l).is_some())
            && {
                let mut seen: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
                seen.sort_unstable();
                seen.dedup();
                seen.len() == self.entries.len()
            }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnonymizationMap {
        let models = [Model::Gpt51, Model::ClaudeSonnet45, Model::Grok4];
        AnonymizationMap::assign(models.iter())
    }

    #[test]
    fn test_labels_are_sequential() {
        let map = sample();
        let labels: Vec<&str> = map.labels().collect();
        assert_eq!(labels, vec!["Response A", "Response B", "Response C"]);
    }

    #[test]
    fn test_bijection() {
        let map = sample();
        for (label, model) in map.iter() {
            assert_eq!(map.model_for(label), Some(model));
            assert_eq!(map.label_for(model), Some(label));
        }
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_unknown_label_and_model() {
        let map = sample();
        assert!(map.model_for("Response Z").is_none());
        assert!(map.label_for(&Model::Gemini3Pro).is_none());
    }

    #[test]
    fn test_covers_exactly() {
        let map = sample();
        let full = vec![
            "Response B".to_string(),
            "Response A".to_string(),
            "Response C".to_string(),
        ];
        assert!(map.covers_exactly(&full));

        let missing = vec!["Response A".to_string(), "Response B".to_string()];
        assert!(!map.covers_exactly(&missing));

        let foreign = vec![
            "Response A".to_string(),
            "Response B".to_string(),
            "Response Z".to_string(),
        ];
        assert!(!map.covers_exactly(&foreign));

        let duplicated = vec![
            "Response A".to_string(),
            "Response A".to_string(),
            "Response B".to_string(),
        ];
        assert!(!map.covers_exactly(&duplicated));
    }
}
