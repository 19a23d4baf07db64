//! Classifies JSON items as one of the empath unions and checks that each
//! re-encodes to the object it was decoded from.

use clap::ValueEnum;
use empath_core::{TaggedUnion, decode, encode};
use empath_types::batch::{
    BatchJob, Source, StateEmbeddingGeneration, StateInference, StateTlInference, StateTraining,
    Task,
};
use empath_types::evi::{ClientEvent, ServerEvent};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// The unions the inspector can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnionKind {
    Source,
    Task,
    InferenceState,
    TrainingState,
    TlInferenceState,
    EmbeddingState,
    BatchJob,
    ServerEvent,
    ClientEvent,
}

/// What happened to one input item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Decoded {
        discriminant: String,
        known: bool,
        /// Whether re-encoding produced exactly the input object.
        round_trip: bool,
        encoded: Value,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub index: usize,
    pub union: &'static str,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Report {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    /// Human-readable form: a summary line followed by the re-encoded JSON.
    pub fn render(&self, pretty: bool) -> String {
        match &self.outcome {
            Outcome::Decoded {
                discriminant,
                known,
                round_trip,
                encoded,
            } => {
                let json = if pretty {
                    serde_json::to_string_pretty(encoded)
                } else {
                    serde_json::to_string(encoded)
                }
                .unwrap_or_else(|_| encoded.to_string());
                format!(
                    "[{}] {} `{}` {} round-trip: {}\n{}",
                    self.index,
                    self.union,
                    discriminant,
                    if *known { "known" } else { "unknown" },
                    if *round_trip { "ok" } else { "changed" },
                    json
                )
            }
            Outcome::Failed { error } => {
                format!("[{}] {} error: {}", self.index, self.union, error)
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Inspects a document holding one object or an array of objects.
pub fn inspect(kind: UnionKind, document: Value) -> Vec<Report> {
    match document {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| inspect_item(kind, index, item))
            .collect(),
        single => vec![inspect_item(kind, 0, single)],
    }
}

pub fn inspect_item(kind: UnionKind, index: usize, item: Value) -> Report {
    match kind {
        UnionKind::Source => inspect_as::<Source>(index, item),
        UnionKind::Task => inspect_as::<Task>(index, item),
        UnionKind::InferenceState => inspect_as::<StateInference>(index, item),
        UnionKind::TrainingState => inspect_as::<StateTraining>(index, item),
        UnionKind::TlInferenceState => inspect_as::<StateTlInference>(index, item),
        UnionKind::EmbeddingState => inspect_as::<StateEmbeddingGeneration>(index, item),
        UnionKind::BatchJob => inspect_as::<BatchJob>(index, item),
        UnionKind::ServerEvent => inspect_as::<ServerEvent>(index, item),
        UnionKind::ClientEvent => inspect_as::<ClientEvent>(index, item),
    }
}

/// Decodes `item` as `U`, re-encodes it and compares against the input.
pub fn inspect_as<U: TaggedUnion>(index: usize, item: Value) -> Report {
    let outcome = match decode::<U>(item.clone()) {
        Ok(decoded) => match encode(&decoded) {
            Ok(encoded) => {
                let round_trip = encoded == item;
                debug!(
                    union = U::NAME,
                    index,
                    discriminant = decoded.discriminant(),
                    round_trip,
                    "Item decoded"
                );
                Outcome::Decoded {
                    discriminant: decoded.discriminant().to_string(),
                    known: decoded.as_unknown().is_none(),
                    round_trip,
                    encoded,
                }
            }
            Err(e) => failed::<U>(index, e.to_string()),
        },
        Err(e) => failed::<U>(index, e.to_string()),
    };

    Report {
        index,
        union: U::NAME,
        outcome,
    }
}

fn failed<U: TaggedUnion>(index: usize, error: String) -> Outcome {
    warn!(union = U::NAME, index, error = %error, "Item failed to decode");
    Outcome::Failed { error }
}
