//! Batch expression-measurement API: job requests, lifecycle states and
//! prediction results.

mod job;
mod predictions;
mod source;
mod state;
mod task;

pub use job::{
    BatchJob, CustomModelRef, CustomModelRequest, DatasetRef, EmbeddingGenerationRequest,
    Granularity, InferenceRequest, JobEmbeddingGeneration, JobInference, JobTlInference,
    JobTraining, ModelOptions, Models, RegistryFileDetail, TlInferenceRequest, TrainingRequest,
};
pub use predictions::{
    FileError, FilePrediction, InferenceResults, InferenceSourcePrediction, LanguagePrediction,
    ModelPredictions, PositionInterval, PredictionGroup, PredictionGroups, ProsodyPrediction,
    TimeInterval,
};
pub use source::{Source, SourceFile, SourceText, SourceUrl};
pub use state::{
    CompletedEmbeddingGeneration, CompletedInference, CompletedTlInference, CompletedTraining,
    StateEmbeddingGeneration,
    StateInference, StateTlInference, StateTraining, TrainingCustomModel,
};
pub use task::{Task, TaskClassification, TaskRegression};
