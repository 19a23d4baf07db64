//! Declarative macros for the two recurring DTO patterns: tagged unions and
//! open string enums.

/// Declares a tagged union enum and its variant registry.
///
/// Each variant is a tuple arm holding its payload record, the wire name of the
/// variant, and the names of its predicate, borrowing accessor and consuming
/// accessor. The macro adds an `Unknown(UnknownVariant<Self>)` arm, implements
/// [`TaggedUnion`](crate::TaggedUnion), `From<Payload>`, and routes
/// `Serialize`/`Deserialize` through the codec.
///
/// ```
/// use empath_core::{tagged_union, UnionError};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// pub struct Ping { pub id: u32 }
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// pub struct Pong { pub id: u32 }
///
/// tagged_union! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum Frame: "kind" {
///         Ping(Ping) = "ping" => (is_ping, as_ping, into_ping),
///         Pong(Pong) = "pong" => (is_pong, as_pong, into_pong),
///     }
/// }
///
/// let frame = Frame::from_json(serde_json::json!({"kind": "ping", "id": 7}))?;
/// assert_eq!(frame.as_ping()?.id, 7);
/// assert!(frame.as_pong().is_err());
/// # Ok::<(), UnionError>(())
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $field:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($payload:ty) = $tag:literal => ($is:ident, $as_ref:ident, $into:ident)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($payload),
            )+
            /// A variant this client does not recognize, kept as the raw object.
            Unknown($crate::UnknownVariant<$name>),
        }

        impl $crate::TaggedUnion for $name {
            const NAME: &'static str = ::core::stringify!($name);
            const DISCRIMINATOR: &'static str = $field;
            const VARIANTS: &'static [&'static str] = &[$($tag),+];

            fn discriminant(&self) -> &str {
                match self {
                    $(Self::$variant(_) => $tag,)+
                    Self::Unknown(unknown) => unknown.discriminant(),
                }
            }

            fn decode_variant(
                tag: &str,
                object: $crate::__private::serde_json::Value,
            ) -> ::core::result::Result<Self, $crate::__private::serde_json::Error> {
                match tag {
                    $($tag => $crate::__private::serde_json::from_value(object).map(Self::$variant),)+
                    other => ::core::result::Result::Err(
                        <$crate::__private::serde_json::Error as $crate::__private::serde::de::Error>::unknown_variant(
                            other,
                            <Self as $crate::TaggedUnion>::VARIANTS,
                        ),
                    ),
                }
            }

            fn encode_payload(
                &self,
            ) -> ::core::result::Result<$crate::__private::serde_json::Value, $crate::__private::serde_json::Error> {
                match self {
                    $(Self::$variant(payload) => $crate::__private::serde_json::to_value(payload),)+
                    Self::Unknown(unknown) => ::core::result::Result::Ok(unknown.to_value()),
                }
            }

            fn from_unknown(unknown: $crate::UnknownVariant<Self>) -> Self {
                Self::Unknown(unknown)
            }

            fn as_unknown(&self) -> ::core::option::Option<&$crate::UnknownVariant<Self>> {
                match self {
                    Self::Unknown(unknown) => ::core::option::Option::Some(unknown),
                    _ => ::core::option::Option::None,
                }
            }
        }

        #[allow(dead_code)]
        impl $name {
            /// Decodes this union from a parsed JSON value.
            pub fn from_json(
                value: $crate::__private::serde_json::Value,
            ) -> ::core::result::Result<Self, $crate::UnionError> {
                $crate::decode(value)
            }

            /// Encodes this union as a flat JSON object.
            pub fn to_json(
                &self,
            ) -> ::core::result::Result<$crate::__private::serde_json::Value, $crate::UnionError> {
                $crate::encode(self)
            }

            /// The discriminant observed on the wire, or the registered name of
            /// the variant this value was built from.
            pub fn discriminant(&self) -> &str {
                <Self as $crate::TaggedUnion>::discriminant(self)
            }

            pub fn is_unknown(&self) -> bool {
                ::core::matches!(self, Self::Unknown(_))
            }

            /// The opaque payload of an unrecognized variant.
            pub fn unknown(&self) -> ::core::option::Option<&$crate::UnknownVariant<Self>> {
                <Self as $crate::TaggedUnion>::as_unknown(self)
            }

            $(
                #[doc = ::core::concat!("Whether this is the `", $tag, "` variant.")]
                pub fn $is(&self) -> bool {
                    ::core::matches!(self, Self::$variant(_))
                }

                #[doc = ::core::concat!("Borrows the `", $tag, "` payload, or fails with `WrongVariant`.")]
                pub fn $as_ref(&self) -> ::core::result::Result<&$payload, $crate::UnionError> {
                    match self {
                        Self::$variant(payload) => ::core::result::Result::Ok(payload),
                        other => ::core::result::Result::Err($crate::wrong_variant($tag, other)),
                    }
                }

                #[doc = ::core::concat!("Takes the `", $tag, "` payload, or fails with `WrongVariant`.")]
                pub fn $into(self) -> ::core::result::Result<$payload, $crate::UnionError> {
                    match self {
                        Self::$variant(payload) => ::core::result::Result::Ok(payload),
                        other => ::core::result::Result::Err($crate::wrong_variant($tag, &other)),
                    }
                }
            )+
        }

        $(
            impl ::core::convert::From<$payload> for $name {
                fn from(payload: $payload) -> Self {
                    Self::$variant(payload)
                }
            }
        )+

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::serialize_union(self, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $crate::deserialize_union(deserializer)
            }
        }
    };
}

/// Declares an open string enum: named known values plus an `Other` arm that
/// carries any string the server sends which this client does not know yet.
///
/// Parsing never fails. A string matching a known value always maps to that
/// value, so `Other` only ever holds unrecognized strings when built through
/// [`from_custom`](#method.from_custom), `From`, `FromStr` or `Deserialize`.
///
/// ```
/// use empath_core::string_enum;
///
/// string_enum! {
///     #[derive(Debug, Clone, PartialEq, Eq, Hash)]
///     pub enum Granularity {
///         Word = "word",
///         Sentence = "sentence",
///     }
/// }
///
/// assert_eq!(Granularity::from("word"), Granularity::Word);
/// assert_eq!(Granularity::from("paragraph").as_str(), "paragraph");
/// assert!(!Granularity::from_custom("paragraph").is_known());
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A value this client does not recognize.
            Other(::std::string::String),
        }

        #[allow(dead_code)]
        impl $name {
            /// Wire values of every known variant.
            pub const KNOWN: &'static [&'static str] = &[$($value),+];

            /// Builds a value from an arbitrary string, mapping known strings to
            /// their named variant.
            pub fn from_custom(value: impl ::core::convert::Into<::std::string::String>) -> Self {
                let value = value.into();
                match value.as_str() {
                    $($value => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// Whether this is one of the named variants.
            pub fn is_known(&self) -> bool {
                !::core::matches!(self, Self::Other(_))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::convert::Infallible;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::core::result::Result::Ok(Self::from_custom(s))
            }
        }

        impl ::core::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from_custom(value)
            }
        }

        impl ::core::convert::From<::std::string::String> for $name {
            fn from(value: ::std::string::String) -> Self {
                Self::from_custom(value)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                ::core::result::Result::Ok(Self::from_custom(value))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::string_enum! {
        #[derive(Debug, Clone, PartialEq, Eq)]
        enum Role {
            User = "user",
            Assistant = "assistant",
        }
    }

    #[test]
    fn test_string_enum_known_values() {
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::Assistant.as_str(), "assistant");
        assert_eq!(Role::KNOWN, &["user", "assistant"]);
        assert!(Role::User.is_known());
    }

    #[test]
    fn test_string_enum_custom_values() {
        let role: Role = "system".parse().unwrap();
        assert_eq!(role, Role::Other("system".to_string()));
        assert_eq!(role.to_string(), "system");
        assert!(!role.is_known());

        // Known strings never end up in `Other`.
        assert_eq!(Role::from_custom("user".to_string()), Role::User);
    }

    #[test]
    fn test_string_enum_serde() {
        let roles: Vec<Role> = serde_json::from_str(r#"["user","tool"]"#).unwrap();
        assert_eq!(roles, vec![Role::User, Role::Other("tool".to_string())]);
        assert_eq!(serde_json::to_string(&roles).unwrap(), r#"["user","tool"]"#);
    }

    #[test]
    fn test_string_enum_rejects_non_strings() {
        assert!(serde_json::from_str::<Role>("3").is_err());
    }
}
