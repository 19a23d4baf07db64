//! Lifecycle states of the four batch job kinds.
//!
//! All four share [`JobState`]; only the `COMPLETED` payload differs, carrying
//! whatever summary the job kind reports once it has finished.

use empath_core::job_state::{Failed, InProgress, JobState, Queued};
use empath_core::{AdditionalProperties, CompletedPayload, StatePayload};
use serde::{Deserialize, Serialize};

pub type StateInference = JobState<Queued, InProgress, CompletedInference, Failed>;
pub type StateTraining = JobState<Queued, InProgress, CompletedTraining, Failed>;
pub type StateTlInference = JobState<Queued, InProgress, CompletedTlInference, Failed>;
pub type StateEmbeddingGeneration = JobState<Queued, InProgress, CompletedEmbeddingGeneration, Failed>;

/// A finished inference job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedInference {
    pub created_timestamp_ms: i64,
    pub started_timestamp_ms: i64,
    pub ended_timestamp_ms: i64,
    /// Number of predictions produced across all sources.
    pub num_predictions: u64,
    /// Number of sources that could not be processed.
    pub num_errors: u64,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A finished training job and the model it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTraining {
    pub created_timestamp_ms: i64,
    pub started_timestamp_ms: i64,
    pub ended_timestamp_ms: i64,
    pub custom_model: TrainingCustomModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<serde_json::Value>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCustomModel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// A finished inference job against a custom model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTlInference {
    pub created_timestamp_ms: i64,
    pub started_timestamp_ms: i64,
    pub ended_timestamp_ms: i64,
    pub num_predictions: u64,
    pub num_errors: u64,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A finished embedding generation job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletedEmbeddingGeneration {
    pub created_timestamp_ms: i64,
    pub started_timestamp_ms: i64,
    pub ended_timestamp_ms: i64,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

macro_rules! completed_timestamps {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl CompletedPayload for $ty {
                const STATE_NAME: &'static str = $name;
            }

            impl StatePayload for $ty {
                fn created_timestamp_ms(&self) -> i64 {
                    self.created_timestamp_ms
                }

                fn started_timestamp_ms(&self) -> Option<i64> {
                    Some(self.started_timestamp_ms)
                }

                fn ended_timestamp_ms(&self) -> Option<i64> {
                    Some(self.ended_timestamp_ms)
                }
            }
        )+
    };
}

completed_timestamps!(
    CompletedInference => "StateInference",
    CompletedTraining => "StateTraining",
    CompletedTlInference => "StateTlInference",
    CompletedEmbeddingGeneration => "StateEmbeddingGeneration",
);

impl CompletedInference {
    /// Whether every source produced predictions.
    pub fn is_clean(&self) -> bool {
        self.num_errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use empath_core::{JobStatus, UnionError};
    use serde_json::json;

    #[test]
    fn test_inference_completed() {
        let state = StateInference::from_json(json!({
            "status": "COMPLETED",
            "created_timestamp_ms": 1_712_000_000_000i64,
            "started_timestamp_ms": 1_712_000_001_000i64,
            "ended_timestamp_ms": 1_712_000_004_500i64,
            "num_predictions": 12,
            "num_errors": 0
        }))
        .unwrap();

        let completed = state.completed().unwrap();
        assert_eq!(completed.num_predictions, 12);
        assert!(completed.is_clean());
        assert_eq!(state.run_time_ms(), Some(3_500));
        assert_eq!(state.status(), Some(JobStatus::Completed));
    }

    #[test]
    fn test_inference_completed_missing_counts() {
        let err = StateInference::from_json(json!({
            "status": "COMPLETED",
            "created_timestamp_ms": 1,
            "started_timestamp_ms": 2,
            "ended_timestamp_ms": 3
        }))
        .unwrap_err();
        assert!(matches!(err, UnionError::PayloadDecode { .. }));
    }

    #[test]
    fn test_training_completed_custom_model() {
        let input = json!({
            "status": "COMPLETED",
            "created_timestamp_ms": 1,
            "started_timestamp_ms": 2,
            "ended_timestamp_ms": 3,
            "custom_model": {"id": "cm-1", "version_id": "v-7"}
        });
        let state = StateTraining::from_json(input.clone()).unwrap();
        let model = &state.completed().unwrap().custom_model;
        assert_eq!(model.id, "cm-1");
        assert_eq!(model.version_id.as_deref(), Some("v-7"));
        assert_eq!(state.to_json().unwrap(), input);
    }

    #[test]
    fn test_all_kinds_share_failed_shape() {
        let failed = json!({
            "status": "FAILED",
            "created_timestamp_ms": 1,
            "started_timestamp_ms": 2,
            "ended_timestamp_ms": 3,
            "message": "oom"
        });
        assert_eq!(StateInference::from_json(failed.clone()).unwrap().failed().unwrap().message, "oom");
        assert_eq!(StateTraining::from_json(failed.clone()).unwrap().failed().unwrap().message, "oom");
        assert_eq!(StateTlInference::from_json(failed.clone()).unwrap().failed().unwrap().message, "oom");
        assert_eq!(
            StateEmbeddingGeneration::from_json(failed).unwrap().failed().unwrap().message,
            "oom"
        );
    }

    #[test]
    fn test_errors_name_the_job_kind() {
        let missing = json!({"created_timestamp_ms": 1});
        let err = StateTraining::from_json(missing.clone()).unwrap_err();
        assert_eq!(err.union(), "StateTraining");
        assert_eq!(StateInference::from_json(missing.clone()).unwrap_err().union(), "StateInference");
        assert_eq!(StateTlInference::from_json(missing.clone()).unwrap_err().union(), "StateTlInference");
        assert_eq!(
            StateEmbeddingGeneration::from_json(missing).unwrap_err().union(),
            "StateEmbeddingGeneration"
        );
    }

    #[test]
    fn test_completed_extra_fields_are_kept() {
        let input = json!({
            "status": "COMPLETED",
            "created_timestamp_ms": 1,
            "started_timestamp_ms": 2,
            "ended_timestamp_ms": 3,
            "num_predictions": 4,
            "num_errors": 1,
            "num_sources": 5
        });
        let state = StateInference::from_json(input.clone()).unwrap();
        let completed = state.completed().unwrap();
        assert_eq!(completed.additional_properties.get("num_sources"), Some(&json!(5)));
        assert!(!completed.additional_properties.contains_key("status"));
        assert_eq!(state.to_json().unwrap(), input);

        let embedding = StateEmbeddingGeneration::from_json(json!({
            "status": "COMPLETED",
            "created_timestamp_ms": 1,
            "started_timestamp_ms": 2,
            "ended_timestamp_ms": 3
        }))
        .unwrap();
        assert_eq!(embedding.completed().unwrap(), &CompletedEmbeddingGeneration {
            created_timestamp_ms: 1,
            started_timestamp_ms: 2,
            ended_timestamp_ms: 3,
            ..Default::default()
        });
    }

    #[test]
    fn test_embedding_generation_queued() {
        let state = StateEmbeddingGeneration::from_json(json!({"status": "QUEUED", "created_timestamp_ms": 9}))
            .unwrap();
        assert!(state.is_queued());
        assert!(!state.is_terminal());
        assert_eq!(state.started_timestamp_ms(), None);
    }
}
