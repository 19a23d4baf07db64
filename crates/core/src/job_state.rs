//! Job Lifecycle State
//!
//! Batch jobs report their progress as a tagged union keyed by `status`:
//!
//! ```text
//! QUEUED ──► IN_PROGRESS ──► COMPLETED
//!    │            │
//!    └────────────┴────────► FAILED
//! ```
//!
//! Every job kind (inference, training, transfer-learning inference, embedding
//! generation) shares this shape and differs only in the payload of each state,
//! so [`JobState`] is generic over the four payload types.

use crate::AdditionalProperties;
use crate::error::UnionError;
use crate::union::{self, TaggedUnion, UnknownVariant};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

const QUEUED: &str = "QUEUED";
const IN_PROGRESS: &str = "IN_PROGRESS";
const COMPLETED: &str = "COMPLETED";
const FAILED: &str = "FAILED";

/// The four registered job states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => QUEUED,
            JobStatus::InProgress => IN_PROGRESS,
            JobStatus::Completed => COMPLETED,
            JobStatus::Failed => FAILED,
        }
    }

    /// Parses a wire discriminant. Returns `None` for unregistered values.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            QUEUED => Some(JobStatus::Queued),
            IN_PROGRESS => Some(JobStatus::InProgress),
            COMPLETED => Some(JobStatus::Completed),
            FAILED => Some(JobStatus::Failed),
            _ => None,
        }
    }

    /// `Completed` and `Failed` are final; the job will not change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Whether a job may move directly from `self` to `next`.
    ///
    /// A state never transitions to itself.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Queued, JobStatus::InProgress)
                | (JobStatus::Queued, JobStatus::Failed)
                | (JobStatus::InProgress, JobStatus::Completed)
                | (JobStatus::InProgress, JobStatus::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamps every state payload exposes.
pub trait StatePayload {
    fn created_timestamp_ms(&self) -> i64;

    fn started_timestamp_ms(&self) -> Option<i64> {
        None
    }

    fn ended_timestamp_ms(&self) -> Option<i64> {
        None
    }
}

/// Names the job-state union whose `COMPLETED` state carries this payload.
///
/// Every job kind has its own completed payload, so the name reported in
/// errors tells the kinds apart.
pub trait CompletedPayload: StatePayload {
    const STATE_NAME: &'static str;
}

// --- Shared State Payloads ---

/// Payload of a job waiting to start.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Queued {
    pub created_timestamp_ms: i64,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Payload of a running job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InProgress {
    pub created_timestamp_ms: i64,
    pub started_timestamp_ms: i64,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Payload of a completed job that reports nothing beyond its timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Completed {
    pub created_timestamp_ms: i64,
    pub started_timestamp_ms: i64,
    pub ended_timestamp_ms: i64,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Payload of a job that stopped with an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Failed {
    pub created_timestamp_ms: i64,
    pub started_timestamp_ms: i64,
    pub ended_timestamp_ms: i64,
    /// Human-readable reason for the failure.
    pub message: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl StatePayload for Queued {
    fn created_timestamp_ms(&self) -> i64 {
        self.created_timestamp_ms
    }
}

impl StatePayload for InProgress {
    fn created_timestamp_ms(&self) -> i64 {
        self.created_timestamp_ms
    }

    fn started_timestamp_ms(&self) -> Option<i64> {
        Some(self.started_timestamp_ms)
    }
}

impl StatePayload for Completed {
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

impl CompletedPayload for Completed {
    const STATE_NAME: &'static str = "JobState";
}

impl StatePayload for Failed {
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

// --- Generic State Union ---

/// The state of a batch job, generic over the payload of each state.
///
/// `Q`, `P`, `C` and `F` are the payloads of `QUEUED`, `IN_PROGRESS`,
/// `COMPLETED` and `FAILED`. A `status` outside those four decodes to
/// [`JobState::Unknown`]. The union name used in errors comes from
/// [`CompletedPayload::STATE_NAME`].
#[derive(Debug, Clone, PartialEq)]
pub enum JobState<Q = Queued, P = InProgress, C = Completed, F = Failed> {
    Queued(Q),
    InProgress(P),
    Completed(C),
    Failed(F),
    /// A state this client does not recognize, kept as the raw object.
    Unknown(UnknownVariant<JobState<Q, P, C, F>>),
}

impl<Q, P, C, F> TaggedUnion for JobState<Q, P, C, F>
where
    Q: Serialize + DeserializeOwned,
    P: Serialize + DeserializeOwned,
    C: Serialize + DeserializeOwned + CompletedPayload,
    F: Serialize + DeserializeOwned,
{
    const NAME: &'static str = C::STATE_NAME;
    const DISCRIMINATOR: &'static str = "status";
    const VARIANTS: &'static [&'static str] = &[QUEUED, IN_PROGRESS, COMPLETED, FAILED];

    fn discriminant(&self) -> &str {
        match self {
            JobState::Queued(_) => QUEUED,
            JobState::InProgress(_) => IN_PROGRESS,
            JobState::Completed(_) => COMPLETED,
            JobState::Failed(_) => FAILED,
            JobState::Unknown(unknown) => unknown.discriminant(),
        }
    }

    fn decode_variant(tag: &str, object: Value) -> Result<Self, serde_json::Error> {
        match tag {
            QUEUED => serde_json::from_value(object).map(JobState::Queued),
            IN_PROGRESS => serde_json::from_value(object).map(JobState::InProgress),
            COMPLETED => serde_json::from_value(object).map(JobState::Completed),
            FAILED => serde_json::from_value(object).map(JobState::Failed),
            other => Err(serde::de::Error::unknown_variant(other, Self::VARIANTS)),
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            JobState::Queued(payload) => serde_json::to_value(payload),
            JobState::InProgress(payload) => serde_json::to_value(payload),
            JobState::Completed(payload) => serde_json::to_value(payload),
            JobState::Failed(payload) => serde_json::to_value(payload),
            JobState::Unknown(unknown) => Ok(unknown.to_value()),
        }
    }

    fn from_unknown(unknown: UnknownVariant<Self>) -> Self {
        JobState::Unknown(unknown)
    }

    fn as_unknown(&self) -> Option<&UnknownVariant<Self>> {
        match self {
            JobState::Unknown(unknown) => Some(unknown),
            _ => None,
        }
    }
}

impl<Q, P, C, F> JobState<Q, P, C, F>
where
    Q: Serialize + DeserializeOwned,
    P: Serialize + DeserializeOwned,
    C: Serialize + DeserializeOwned + CompletedPayload,
    F: Serialize + DeserializeOwned,
{
    pub fn from_json(value: Value) -> Result<Self, UnionError> {
        union::decode(value)
    }

    pub fn to_json(&self) -> Result<Value, UnionError> {
        union::encode(self)
    }

    /// The `status` observed on the wire.
    pub fn discriminant(&self) -> &str {
        <Self as TaggedUnion>::discriminant(self)
    }

    pub fn queued(&self) -> Result<&Q, UnionError> {
        match self {
            JobState::Queued(payload) => Ok(payload),
            other => Err(union::wrong_variant(QUEUED, other)),
        }
    }

    pub fn in_progress(&self) -> Result<&P, UnionError> {
        match self {
            JobState::InProgress(payload) => Ok(payload),
            other => Err(union::wrong_variant(IN_PROGRESS, other)),
        }
    }

    pub fn completed(&self) -> Result<&C, UnionError> {
        match self {
            JobState::Completed(payload) => Ok(payload),
            other => Err(union::wrong_variant(COMPLETED, other)),
        }
    }

    pub fn failed(&self) -> Result<&F, UnionError> {
        match self {
            JobState::Failed(payload) => Ok(payload),
            other => Err(union::wrong_variant(FAILED, other)),
        }
    }
}

impl<Q, P, C, F> JobState<Q, P, C, F> {
    /// The registered status, or `None` for an unrecognized one.
    pub fn status(&self) -> Option<JobStatus> {
        match self {
            JobState::Queued(_) => Some(JobStatus::Queued),
            JobState::InProgress(_) => Some(JobStatus::InProgress),
            JobState::Completed(_) => Some(JobStatus::Completed),
            JobState::Failed(_) => Some(JobStatus::Failed),
            JobState::Unknown(_) => None,
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, JobState::Queued(_))
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, JobState::InProgress(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, JobState::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, JobState::Failed(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, JobState::Unknown(_))
    }

    /// Whether the job has finished. An unrecognized state is not terminal.
    pub fn is_terminal(&self) -> bool {
        self.status().is_some_and(JobStatus::is_terminal)
    }

    /// Whether `next` is a legal successor of this state. Unrecognized states
    /// have no known successors.
    pub fn can_transition_to(&self, next: &Self) -> bool {
        match (self.status(), next.status()) {
            (Some(current), Some(next)) => current.can_transition_to(next),
            _ => false,
        }
    }
}

impl<Q, P, C, F> JobState<Q, P, C, F>
where
    Q: StatePayload,
    P: StatePayload,
    C: StatePayload,
    F: StatePayload,
{
    /// Creation time of the job. Read from the raw object for unknown states.
    pub fn created_timestamp_ms(&self) -> Option<i64> {
        match self {
            JobState::Queued(payload) => Some(payload.created_timestamp_ms()),
            JobState::InProgress(payload) => Some(payload.created_timestamp_ms()),
            JobState::Completed(payload) => Some(payload.created_timestamp_ms()),
            JobState::Failed(payload) => Some(payload.created_timestamp_ms()),
            JobState::Unknown(unknown) => raw_timestamp(unknown, "created_timestamp_ms"),
        }
    }

    pub fn started_timestamp_ms(&self) -> Option<i64> {
        match self {
            JobState::Queued(payload) => payload.started_timestamp_ms(),
            JobState::InProgress(payload) => payload.started_timestamp_ms(),
            JobState::Completed(payload) => payload.started_timestamp_ms(),
            JobState::Failed(payload) => payload.started_timestamp_ms(),
            JobState::Unknown(unknown) => raw_timestamp(unknown, "started_timestamp_ms"),
        }
    }

    pub fn ended_timestamp_ms(&self) -> Option<i64> {
        match self {
            JobState::Queued(payload) => payload.ended_timestamp_ms(),
            JobState::InProgress(payload) => payload.ended_timestamp_ms(),
            JobState::Completed(payload) => payload.ended_timestamp_ms(),
            JobState::Failed(payload) => payload.ended_timestamp_ms(),
            JobState::Unknown(unknown) => raw_timestamp(unknown, "ended_timestamp_ms"),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_timestamp_ms()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_timestamp_ms()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_timestamp_ms()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Milliseconds between start and end, once the job has finished running.
    /// `None` if the difference does not fit in an `i64`.
    pub fn run_time_ms(&self) -> Option<i64> {
        self.ended_timestamp_ms()?
            .checked_sub(self.started_timestamp_ms()?)
    }
}

fn raw_timestamp<U>(unknown: &UnknownVariant<U>, key: &str) -> Option<i64> {
    unknown.get(key).and_then(Value::as_i64)
}

impl<Q, P, C, F> Serialize for JobState<Q, P, C, F>
where
    Q: Serialize + DeserializeOwned,
    P: Serialize + DeserializeOwned,
    C: Serialize + DeserializeOwned + CompletedPayload,
    F: Serialize + DeserializeOwned,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        union::serialize_union(self, serializer)
    }
}

impl<'de, Q, P, C, F> Deserialize<'de> for JobState<Q, P, C, F>
where
    Q: Serialize + DeserializeOwned,
    P: Serialize + DeserializeOwned,
    C: Serialize + DeserializeOwned + CompletedPayload,
    F: Serialize + DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        union::deserialize_union(deserializer)
    }
}
