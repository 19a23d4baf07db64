//! Errors raised by helpers on the data types, as opposed to the codec.

/// Failures when interpreting the contents of a decoded record.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DataError {
    #[error("Invalid base64 audio: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("PCM16 audio must have an even number of bytes, got {0}")]
    OddPcmLength(usize),

    #[error("Voice parameter `{name}` must be within -100..=100, got {value}")]
    ParameterOutOfRange { name: &'static str, value: i32 },

    #[error("Embedded JSON in `{field}` is invalid: {source}")]
    EmbeddedJson {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_display() {
        assert_eq!(
            DataError::OddPcmLength(3).to_string(),
            "PCM16 audio must have an even number of bytes, got 3"
        );
        assert_eq!(
            DataError::ParameterOutOfRange {
                name: "buoyancy",
                value: 140
            }
            .to_string(),
            "Voice parameter `buoyancy` must be within -100..=100, got 140"
        );
    }
}
