//! empath
//!
//! Data model for the empath emotion-AI platform: a tagged union codec for
//! discriminated JSON objects and the typed records of the batch and voice
//! interface APIs built on it.
//!
//! ```
//! use empath::batch::StateInference;
//!
//! let state = StateInference::from_json(serde_json::json!({
//!     "status": "QUEUED",
//!     "created_timestamp_ms": 1712590457884i64
//! }))?;
//! assert!(state.is_queued());
//! # Ok::<(), empath::UnionError>(())
//! ```

pub use empath_core::{
    AdditionalProperties, JobState, JobStatus, StatePayload, TaggedUnion, UnionError,
    UnknownVariant, decode, encode, job_state, string_enum, tagged_union,
};
pub use empath_types::{
    DataError, EmotionScore, EmotionScoreMap, EmotionScores, batch, emotion, evi,
};
