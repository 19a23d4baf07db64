use crate::error::DataError;
use base64::Engine;

/// Sample rate the chat socket assumes for raw PCM16 input.
pub const PCM16_SAMPLE_RATE: u32 = 16_000;

/// Encodes little-endian PCM16 samples as standard base64.
pub fn encode_pcm16(samples: &[i16]) -> String {
    let bytes: Vec<u8> = samples
        .iter()
        .flat_map(|&sample| sample.to_le_bytes())
        .collect();
    base64::engine::general_purpose::STANDARD.encode(&bytes)
}

/// Decodes a base64 fragment of little-endian PCM16 audio.
pub fn decode_pcm16(fragment: &str) -> Result<Vec<i16>, DataError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(fragment)?;
    if bytes.len() % 2 != 0 {
        return Err(DataError::OddPcmLength(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}

/// Converts f32 samples in `[-1, 1]` to PCM16, clamping anything outside.
pub fn f32_to_pcm16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| (sample * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16)
        .collect()
}

pub fn pcm16_to_f32(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&sample| sample as f32 / 32768.0)
        .collect()
}
