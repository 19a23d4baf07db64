//! Emotion measures returned by the expression models.
//!
//! Batch predictions list scores as `[{"name": ..., "score": ...}]` while the
//! chat protocol sends a flat `{"Joy": 0.4, ...}` object. Both shapes rank the
//! same way through [`EmotionScores::top`] and [`EmotionScoreMap::top`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One named emotion and its score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub name: String,
    pub score: f64,
}

/// Scores in list form, as emitted by batch predictions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionScores(pub Vec<EmotionScore>);

impl EmotionScores {
    pub fn score(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|e| e.name == name).map(|e| e.score)
    }

    /// The `n` highest-scoring emotions, best first.
    pub fn top(&self, n: usize) -> Vec<&EmotionScore> {
        let mut ranked: Vec<&EmotionScore> = self.0.iter().collect();
        ranked.sort_by(|a, b| by_score_desc(a.score, b.score));
        ranked.truncate(n);
        ranked
    }

    pub fn dominant(&self) -> Option<&EmotionScore> {
        self.top(1).into_iter().next()
    }
}

/// Scores keyed by emotion name, as emitted on the chat socket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionScoreMap(pub BTreeMap<String, f64>);

impl EmotionScoreMap {
    pub fn score(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// The `n` highest-scoring emotions, best first. Ties keep name order.
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> =
            self.0.iter().map(|(name, score)| (name.as_str(), *score)).collect();
        ranked.sort_by(|a, b| by_score_desc(a.1, b.1));
        ranked.truncate(n);
        ranked
    }

    pub fn to_scores(&self) -> EmotionScores {
        EmotionScores(
            self.0
                .iter()
                .map(|(name, score)| EmotionScore {
                    name: name.clone(),
                    score: *score,
                })
                .collect(),
        )
    }
}

// NaN scores sort last.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn sample_scores() -> EmotionScores {
        serde_json::from_value(json!([
            {"name": "Calmness", "score": 0.21},
            {"name": "Joy", "score": 0.64},
            {"name": "Interest", "score": 0.37}
        ]))
        .unwrap()
    }

    #[test]
    fn test_list_scores_ranking() {
        let scores = sample_scores();
        let top = scores.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Joy");
        assert_eq!(top[1].name, "Interest");
        assert_eq!(scores.dominant().unwrap().name, "Joy");
        assert_relative_eq!(scores.score("Calmness").unwrap(), 0.21);
        assert!(scores.score("Anger").is_none());
    }

    #[test]
    fn test_top_larger_than_len() {
        assert_eq!(sample_scores().top(10).len(), 3);
        assert!(EmotionScores::default().dominant().is_none());
    }

    #[test]
    fn test_map_scores() {
        let map: EmotionScoreMap =
            serde_json::from_value(json!({"Admiration": 0.1, "Amusement": 0.8, "Anger": 0.05}))
                .unwrap();
        let top = map.top(1);
        assert_eq!(top[0].0, "Amusement");
        assert_relative_eq!(top[0].1, 0.8);

        let list = map.to_scores();
        assert_eq!(list.0.len(), 3);
        assert_relative_eq!(list.score("Anger").unwrap(), 0.05);
    }

    #[test]
    fn test_nan_sorts_last() {
        let map = EmotionScoreMap(BTreeMap::from([
            ("A".to_string(), f64::NAN),
            ("B".to_string(), 0.2),
        ]));
        assert_eq!(map.top(1)[0].0, "B");
    }
}
