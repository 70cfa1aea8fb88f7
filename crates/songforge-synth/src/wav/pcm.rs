//! PCM payload extraction and hashing.

use crate::error::WavError;

use super::header::WavHeader;

/// Returns the sample bytes of a WAV file.
pub fn extract_pcm_data(wav_data: &[u8]) -> Result<&[u8], WavError> {
    let header = WavHeader::parse(wav_data)?;
    Ok(&wav_data[header.data_range()])
}

/// Decodes little-endian 16-bit samples. A trailing odd byte is ignored.
pub fn decode_pcm16(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

/// BLAKE3 hash (hex) of the sample data of a WAV file.
///
/// Only the data chunk is hashed, so two files with the same audio compare
/// equal regardless of header differences.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Result<String, WavError> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
