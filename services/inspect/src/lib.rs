//! empath-inspect Library Crate
//!
//! Decodes JSON documents as one of the empath tagged unions and reports how
//! each item was classified and whether it re-encodes to the same object. The
//! `empath-inspect` binary is a thin wrapper around this library.

pub mod config;
pub mod inspect;
