//! empath-types
//!
//! Typed records for the empath platform APIs, built on the tagged union codec
//! from `empath-core`.
//!
//! - [`batch`]: expression-measurement jobs, their lifecycle states and
//!   prediction results.
//! - [`evi`]: empathic voice interface resources and the chat socket protocol.
//! - [`emotion`]: emotion score collections shared by both.

pub mod batch;
pub mod emotion;
mod error;
pub mod evi;

pub use emotion::{EmotionScore, EmotionScoreMap, EmotionScores};
pub use error::DataError;
