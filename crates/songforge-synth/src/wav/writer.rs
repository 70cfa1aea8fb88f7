//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use super::format::{WavFormat, FMT_CHUNK_LEN, FORMAT_PCM, HEADER_LEN};

/// Full-scale 16-bit magnitude.
const PCM16_SCALE: f64 = 32767.0;

/// Clamps a byte count to the 32-bit size fields of the RIFF header.
fn size_field(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Builds the canonical 44-byte header for `data_len` bytes of samples.
///
/// Size fields saturate at `u32::MAX` for data beyond the 4 GiB RIFF limit.
pub(crate) fn header_bytes(format: &WavFormat, data_len: usize) -> [u8; HEADER_LEN] {
    let data_size = size_field(data_len);
    let riff_size = data_size.saturating_add(36); // File size minus the 8-byte RIFF preamble
    let mut header = [0u8; HEADER_LEN];

    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    header[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());
    header
}

/// Writes a complete WAV file to a writer.
///
/// `pcm_data` must already be interleaved little-endian samples matching
/// `format`.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&header_bytes(format, pcm_data.len()))?;
    writer.write_all(pcm_data)?;
    Ok(())
}

/// Writes a WAV file into a new byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    buffer.extend_from_slice(&header_bytes(format, pcm_data.len()));
    buffer.extend_from_slice(pcm_data);
    buffer
}

/// Quantizes one float sample to 16-bit PCM.
///
/// Clamps to `[-1, 1]`, scales by 32767 and truncates toward zero, so the
/// result is always within `[-32767, 32767]`.
#[inline]
pub fn quantize(sample: f32) -> i16 {
    let clipped = (sample as f64).clamp(-1.0, 1.0);
    (clipped * PCM16_SCALE) as i16
}

/// Converts planar channels to interleaved 16-bit PCM bytes.
///
/// Frame `i` is written as channel 0, channel 1, ... before frame `i + 1`.
/// Channels are truncated to the shortest one.
pub fn channels_to_pcm16(channels: &[&[f32]]) -> Vec<u8> {
    let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    let mut pcm = Vec::with_capacity(frames * channels.len() * 2);

    for i in 0..frames {
        for channel in channels {
            pcm.extend_from_slice(&quantize(channel[i]).to_le_bytes());
        }
    }

    pcm
}
