//! Tagged Union Codec
//!
//! Converts between flat JSON objects that carry a string discriminator field
//! and Rust enums with one arm per registered variant plus an `Unknown` arm.
//!
//! The wire shape puts the discriminator next to the payload fields:
//!
//! ```json
//! {"type": "url", "url": "https://example.com/a.wav"}
//! ```
//!
//! Decoding looks the discriminator up in the union's registry (its
//! [`TaggedUnion`] impl). A registered name hands the remaining fields to that
//! variant's payload decoder; anything else is kept verbatim in an
//! [`UnknownVariant`] so newer server-side variants never break older clients.
//! Encoding serializes the payload first and stamps the discriminator last, so
//! the codec, not the payload, owns tag placement.

use crate::error::{UnionError, json_kind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// The compile-time variant registry of one union type.
///
/// Implementations are normally generated by [`tagged_union!`](crate::tagged_union);
/// [`JobState`](crate::JobState) implements it by hand because it is generic.
pub trait TaggedUnion: Sized {
    /// Type name used in error messages.
    const NAME: &'static str;
    /// Name of the JSON field carrying the discriminant.
    const DISCRIMINATOR: &'static str;
    /// Discriminant values of every registered variant.
    const VARIANTS: &'static [&'static str];

    /// The discriminant of this value: the registered name of its variant, or
    /// the string observed on the wire for an unknown variant.
    fn discriminant(&self) -> &str;

    /// Decodes `object` as the payload of the registered variant `tag`.
    ///
    /// Only called with names listed in [`Self::VARIANTS`], and with the
    /// discriminator field already removed from `object`.
    fn decode_variant(tag: &str, object: Value) -> Result<Self, serde_json::Error>;

    /// Serializes the payload of this value, without any discriminator.
    fn encode_payload(&self) -> Result<Value, serde_json::Error>;

    /// Wraps an unrecognized variant decoded for this union.
    fn from_unknown(unknown: UnknownVariant<Self>) -> Self;

    /// Returns the opaque payload if this value holds an unrecognized variant.
    fn as_unknown(&self) -> Option<&UnknownVariant<Self>>;

    /// Whether `tag` names a registered variant of this union.
    fn is_registered(tag: &str) -> bool {
        Self::VARIANTS.contains(&tag)
    }
}

/// A variant the client does not recognize, kept as the raw JSON object.
///
/// Only [`decode`] creates these, and only for discriminants missing from the
/// registry of `U`. The type parameter ties the value to that one union, so an
/// opaque object decoded for one union cannot be placed in another union whose
/// registry does know its discriminant:
///
/// ```compile_fail
/// use empath_core::tagged_union;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// pub struct Ping {}
///
/// tagged_union! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum A: "type" { Ping(Ping) = "ping" => (is_ping, as_ping, into_ping) }
/// }
///
/// tagged_union! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum B: "type" { Ping(Ping) = "pong" => (is_ping, as_ping, into_ping) }
/// }
///
/// let a = A::from_json(serde_json::json!({"type": "pong"})).unwrap();
/// if let A::Unknown(unknown) = a {
///     let _ = B::Unknown(unknown);
/// }
/// ```
pub struct UnknownVariant<U> {
    discriminant: String,
    fields: Map<String, Value>,
    union: PhantomData<fn() -> U>,
}

impl<U> UnknownVariant<U> {
    fn new(discriminant: String, fields: Map<String, Value>) -> Self {
        Self {
            discriminant,
            fields,
            union: PhantomData,
        }
    }

    /// The discriminant observed on the wire.
    pub fn discriminant(&self) -> &str {
        &self.discriminant
    }

    /// Every field of the original object, discriminator included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The original object as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

// Manual impls so that `U` itself needs no bounds.
impl<U> fmt::Debug for UnknownVariant<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnknownVariant")
            .field("discriminant", &self.discriminant)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<U> Clone for UnknownVariant<U> {
    fn clone(&self) -> Self {
        Self::new(self.discriminant.clone(), self.fields.clone())
    }
}

impl<U> PartialEq for UnknownVariant<U> {
    fn eq(&self, other: &Self) -> bool {
        self.discriminant == other.discriminant && self.fields == other.fields
    }
}

impl<U> Eq for UnknownVariant<U> {}

/// Decodes a JSON value into the union `U`.
///
/// # Errors
///
/// - [`UnionError::NotAnObject`] if `value` is not a JSON object.
/// - [`UnionError::MissingDiscriminator`] if the discriminator field is absent.
/// - [`UnionError::InvalidDiscriminatorType`] if it is present but not a string.
/// - [`UnionError::PayloadDecode`] if a registered variant's payload is malformed.
pub fn decode<U: TaggedUnion>(value: Value) -> Result<U, UnionError> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(UnionError::NotAnObject {
                union: U::NAME,
                found: json_kind(&other),
            });
        }
    };

    let tag = match object.get(U::DISCRIMINATOR) {
        Some(Value::String(tag)) => tag.clone(),
        Some(Value::Null) => {
            return Err(UnionError::InvalidDiscriminatorType {
                union: U::NAME,
                field: U::DISCRIMINATOR,
                found: None,
            });
        }
        Some(other) => {
            return Err(UnionError::InvalidDiscriminatorType {
                union: U::NAME,
                field: U::DISCRIMINATOR,
                found: Some(other.to_string()),
            });
        }
        None => {
            return Err(UnionError::MissingDiscriminator {
                union: U::NAME,
                field: U::DISCRIMINATOR,
            });
        }
    };

    if !U::is_registered(&tag) {
        debug!(
            union = U::NAME,
            discriminant = %tag,
            "Unrecognized variant, keeping opaque payload"
        );
        return Ok(U::from_unknown(UnknownVariant::new(tag, object)));
    }

    trace!(union = U::NAME, discriminant = %tag, "Decoding variant payload");
    object.remove(U::DISCRIMINATOR);
    U::decode_variant(&tag, Value::Object(object)).map_err(|source| UnionError::PayloadDecode {
        union: U::NAME,
        variant: tag,
        source,
    })
}

/// Encodes a union value as a flat JSON object with its discriminator stamped
/// on top of the payload fields.
///
/// Whatever the payload itself produced for the discriminator field is
/// overwritten with [`TaggedUnion::discriminant`].
pub fn encode<U: TaggedUnion>(union: &U) -> Result<Value, UnionError> {
    let discriminant = union.discriminant();
    trace!(union = U::NAME, discriminant, "Encoding variant payload");

    let payload = union
        .encode_payload()
        .map_err(|source| UnionError::PayloadEncode {
            union: U::NAME,
            variant: discriminant.to_string(),
            source,
        })?;

    let Value::Object(mut object) = payload else {
        return Err(UnionError::PayloadNotObject {
            union: U::NAME,
            variant: discriminant.to_string(),
        });
    };
    object.insert(
        U::DISCRIMINATOR.to_string(),
        Value::String(discriminant.to_string()),
    );
    Ok(Value::Object(object))
}

/// Builds the [`UnionError::WrongVariant`] returned by typed accessors.
pub fn wrong_variant<U: TaggedUnion>(expected: &'static str, actual: &U) -> UnionError {
    UnionError::WrongVariant {
        union: U::NAME,
        expected,
        actual: actual.discriminant().to_string(),
    }
}

/// `serde` adapter: serializes a union through [`encode`].
pub fn serialize_union<U, S>(union: &U, serializer: S) -> Result<S::Ok, S::Error>
where
    U: TaggedUnion,
    S: Serializer,
{
    encode(union)
        .map_err(serde::ser::Error::custom)?
        .serialize(serializer)
}

/// `serde` adapter: deserializes a union through [`decode`].
pub fn deserialize_union<'de, U, D>(deserializer: D) -> Result<U, D::Error>
where
    U: TaggedUnion,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decode(value).map_err(serde::de::Error::custom)
}
