//! Batch job records and the requests that created them.

use super::source::Source;
use super::state::{StateEmbeddingGeneration, StateInference, StateTlInference, StateTraining};
use super::task::Task;
use empath_core::{AdditionalProperties, JobStatus, string_enum, tagged_union};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

string_enum! {
    /// How finely model output is grouped over time or text.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum Granularity {
        Word = "word",
        Sentence = "sentence",
        Utterance = "utterance",
        ConversationalTurn = "conversational_turn",
    }
}

/// Per-model options; unrecognized options pass through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// The expression models to run. A model left as `None` is not run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Models {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<ModelOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst: Option<ModelOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prosody: Option<ModelOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<ModelOptions>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InferenceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Models>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub notify: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomModelRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub custom_model: CustomModelRequest,
    pub dataset: DatasetRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_feature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomModelRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TlInferenceRequest {
    pub custom_model: CustomModelRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub notify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFileDetail {
    pub file_id: String,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingGenerationRequest {
    pub registry_file_details: Vec<RegistryFileDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInference {
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub request: InferenceRequest,
    pub state: StateInference,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTraining {
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub request: TrainingRequest,
    pub state: StateTraining,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTlInference {
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub request: TlInferenceRequest,
    pub state: StateTlInference,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEmbeddingGeneration {
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub request: EmbeddingGenerationRequest,
    pub state: StateEmbeddingGeneration,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

tagged_union! {
    /// Any batch job, keyed by `type`, as returned by the job listing.
    #[derive(Debug, Clone, PartialEq)]
    pub enum BatchJob: "type" {
        Inference(JobInference) = "INFERENCE" => (is_inference, as_inference, into_inference),
        Training(JobTraining) = "TRAINING" => (is_training, as_training, into_training),
        TlInference(JobTlInference) = "TL_INFERENCE"
            => (is_tl_inference, as_tl_inference, into_tl_inference),
        EmbeddingGeneration(JobEmbeddingGeneration) = "EMBEDDING_GENERATION"
            => (is_embedding_generation, as_embedding_generation, into_embedding_generation),
    }
}

impl BatchJob {
    pub fn job_id(&self) -> Option<Uuid> {
        match self {
            BatchJob::Inference(job) => Some(job.job_id),
            BatchJob::Training(job) => Some(job.job_id),
            BatchJob::TlInference(job) => Some(job.job_id),
            BatchJob::EmbeddingGeneration(job) => Some(job.job_id),
            BatchJob::Unknown(unknown) => unknown
                .get("job_id")
                .and_then(|id| id.as_str())
                .and_then(|id| Uuid::parse_str(id).ok()),
        }
    }

    /// Status of the job's current state, if both the job kind and the state
    /// are recognized.
    pub fn status(&self) -> Option<JobStatus> {
        match self {
            BatchJob::Inference(job) => job.state.status(),
            BatchJob::Training(job) => job.state.status(),
            BatchJob::TlInference(job) => job.state.status(),
            BatchJob::EmbeddingGeneration(job) => job.state.status(),
            BatchJob::Unknown(_) => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_some_and(JobStatus::is_terminal)
    }
}
