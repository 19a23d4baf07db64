//! Errors raised while decoding, encoding or inspecting tagged unions.

use serde_json::Value;

/// Failures of the tagged union codec and of variant accessors.
///
/// Every variant names the union it came from so that a failure deep inside a
/// nested record can still be traced back to the type that rejected it.
/// An unrecognized discriminant is not represented here: it decodes to the
/// union's `Unknown` arm instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UnionError {
    #[error("{union}: expected a JSON object, found {found}")]
    NotAnObject {
        union: &'static str,
        found: &'static str,
    },

    #[error("{union}: discriminator field `{field}` is missing")]
    MissingDiscriminator {
        union: &'static str,
        field: &'static str,
    },

    #[error(
        "{union}: discriminator field `{field}` must be a string, found {}",
        .found.as_deref().unwrap_or("null")
    )]
    InvalidDiscriminatorType {
        union: &'static str,
        field: &'static str,
        /// Textual form of the offending value, `None` when it was `null`.
        found: Option<String>,
    },

    #[error("{union}: failed to decode `{variant}` payload: {source}")]
    PayloadDecode {
        union: &'static str,
        variant: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{union}: failed to encode `{variant}` payload: {source}")]
    PayloadEncode {
        union: &'static str,
        variant: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{union}: `{variant}` payload did not serialize to a JSON object")]
    PayloadNotObject {
        union: &'static str,
        variant: String,
    },

    #[error("{union}: expected variant `{expected}`, found `{actual}`")]
    WrongVariant {
        union: &'static str,
        expected: &'static str,
        actual: String,
    },
}

impl UnionError {
    /// The name of the union type that produced this error.
    pub fn union(&self) -> &'static str {
        match self {
            Self::NotAnObject { union, .. }
            | Self::MissingDiscriminator { union, .. }
            | Self::InvalidDiscriminatorType { union, .. }
            | Self::PayloadDecode { union, .. }
            | Self::PayloadEncode { union, .. }
            | Self::PayloadNotObject { union, .. }
            | Self::WrongVariant { union, .. } => union,
        }
    }
}

/// Short JSON type name used in error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
