//! Media sources submitted for inference.

use empath_core::{AdditionalProperties, tagged_union};
use serde::{Deserialize, Serialize};

/// Media fetched by the platform from a public URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUrl {
    pub url: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Media uploaded with the request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5sum: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Raw text submitted inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    pub text: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

tagged_union! {
    /// Where the media of a prediction came from, keyed by `type`.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Source: "type" {
        Url(SourceUrl) = "url" => (is_url, as_url, into_url),
        File(SourceFile) = "file" => (is_file, as_file, into_file),
        Text(SourceText) = "text" => (is_text, as_text, into_text),
    }
}

impl Source {
    pub fn url(url: impl Into<String>) -> Self {
        Source::Url(SourceUrl {
            url: url.into(),
            additional_properties: AdditionalProperties::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Source::Text(SourceText {
            text: text.into(),
            additional_properties: AdditionalProperties::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use empath_core::UnionError;
    use serde_json::json;

    #[test]
    fn test_url_source() {
        let source = Source::from_json(json!({"type": "url", "url": "https://example.com/a.wav"}))
            .unwrap();
        assert_eq!(source.discriminant(), "url");
        assert_eq!(source.as_url().unwrap().url, "https://example.com/a.wav");
        assert_eq!(
            source.to_json().unwrap(),
            json!({"type": "url", "url": "https://example.com/a.wav"})
        );
    }

    #[test]
    fn test_file_source_optional_fields() {
        let source = Source::from_json(json!({"type": "file", "filename": "clip.mp3"})).unwrap();
        let file = source.as_file().unwrap();
        assert_eq!(file.filename.as_deref(), Some("clip.mp3"));
        assert_eq!(file.md5sum, None);
        assert_eq!(
            source.to_json().unwrap(),
            json!({"type": "file", "filename": "clip.mp3"})
        );
    }

    #[test]
    fn test_text_source_requires_text() {
        let err = Source::from_json(json!({"type": "text"})).unwrap_err();
        assert!(matches!(err, UnionError::PayloadDecode { ref variant, .. } if variant == "text"));
    }

    #[test]
    fn test_future_source_type() {
        let source = Source::from_json(json!({"type": "future_type", "foo": "bar"})).unwrap();
        assert!(!source.is_url());
        assert!(!source.is_file());
        assert!(!source.is_text());
        assert_eq!(source.unknown().unwrap().get("foo"), Some(&json!("bar")));
    }

    #[test]
    fn test_extra_source_fields_are_kept() {
        let input = json!({"type": "url", "url": "https://x", "headers": {"range": "bytes=0-"}});
        let source = Source::from_json(input.clone()).unwrap();
        let url = source.as_url().unwrap();
        assert_eq!(url.additional_properties.len(), 1);
        assert!(url.additional_properties.contains_key("headers"));
        assert!(!url.additional_properties.contains_key("type"));
        assert_eq!(source.to_json().unwrap(), input);
    }

    #[test]
    fn test_constructors_derive_discriminant() {
        assert_eq!(Source::url("https://x").discriminant(), "url");
        assert_eq!(Source::text("hello").discriminant(), "text");
        assert_eq!(Source::from(SourceFile::default()).discriminant(), "file");
    }
}
