//! empath-core
//!
//! The reusable pieces of the empath SDK data model:
//!
//! - [`TaggedUnion`], [`decode`] and [`encode`]: the tagged union codec that
//!   turns flat, discriminated JSON objects into Rust enums and back, keeping
//!   unrecognized variants as [`UnknownVariant`] instead of failing.
//! - [`tagged_union!`] and [`string_enum!`]: declarative macros for union types
//!   and open string enums.
//! - [`JobState`]: the generic `QUEUED → IN_PROGRESS → COMPLETED | FAILED`
//!   lifecycle shared by every batch job kind.
//!
//! The codec never parses or prints text; it works on `serde_json::Value`
//! trees handed to it by whatever transport produced them.

mod error;
pub mod job_state;
mod macros;
mod union;

pub use error::UnionError;
pub use job_state::{CompletedPayload, JobState, JobStatus, StatePayload};
pub use union::{
    TaggedUnion, UnknownVariant, decode, deserialize_union, encode, serialize_union,
    wrong_variant,
};

/// Unrecognized JSON fields captured by `#[serde(flatten)]` on resource records.
pub type AdditionalProperties = serde_json::Map<String, serde_json::Value>;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
