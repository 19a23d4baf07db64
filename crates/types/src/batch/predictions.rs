//! Prediction files produced by a completed inference job.

use super::source::Source;
use crate::emotion::EmotionScores;
use serde::{Deserialize, Serialize};

/// Predictions for one submitted source, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceSourcePrediction {
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<InferenceResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InferenceResults {
    #[serde(default)]
    pub predictions: Vec<FilePrediction>,
    #[serde(default)]
    pub errors: Vec<FileError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilePrediction {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    pub models: ModelPredictions,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPredictions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prosody: Option<PredictionGroups<ProsodyPrediction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<PredictionGroups<LanguagePrediction>>,
}

/// Model output grouped by speaker or segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionGroups<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub grouped_predictions: Vec<PredictionGroup<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionGroup<T> {
    pub id: String,
    pub predictions: Vec<T>,
}

impl<T> PredictionGroups<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.grouped_predictions
            .iter()
            .flat_map(|group| group.predictions.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub begin: f64,
    pub end: f64,
}

impl TimeInterval {
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionInterval {
    pub begin: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProsodyPrediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub time: TimeInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_confidence: Option<f64>,
    pub emotions: EmotionScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagePrediction {
    pub text: String,
    pub position: PositionInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeInterval>,
    pub emotions: EmotionScores,
}

impl InferenceSourcePrediction {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Every prosody prediction across all files of this source.
    pub fn prosody(&self) -> impl Iterator<Item = &ProsodyPrediction> {
        self.results
            .iter()
            .flat_map(|results| results.predictions.iter())
            .filter_map(|file| file.models.prosody.as_ref())
            .flat_map(|groups| groups.iter())
    }
}
