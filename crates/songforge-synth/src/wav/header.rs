//! WAV header parsing.

use serde::Serialize;

use crate::error::WavError;

use super::format::{WavFormat, FORMAT_PCM, HEADER_LEN};

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn expect_id(data: &[u8], offset: usize, expected: &'static str) -> Result<(), WavError> {
    if &data[offset..offset + 4] == expected.as_bytes() {
        Ok(())
    } else {
        Err(WavError::BadChunkId { offset, expected })
    }
}

/// Decoded fields of a 16-bit PCM WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    /// RIFF chunk size (file size minus 8).
    pub riff_size: u32,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Declared bytes per second.
    pub byte_rate: u32,
    /// Declared bytes per frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Size of the data chunk in bytes.
    pub data_size: u32,
    /// Offset of the first sample byte.
    pub data_offset: usize,
}

impl WavHeader {
    /// Parses the header of a complete WAV file.
    ///
    /// `fmt ` must be the first chunk. Unknown chunks between `fmt ` and
    /// `data` are skipped (word aligned).
    pub fn parse(data: &[u8]) -> Result<Self, WavError> {
        if data.len() < HEADER_LEN {
            return Err(WavError::TooShort {
                len: data.len(),
                needed: HEADER_LEN,
            });
        }

        expect_id(data, 0, "RIFF")?;
        expect_id(data, 8, "WAVE")?;
        expect_id(data, 12, "fmt ")?;

        let fmt_size = u32_at(data, 16) as usize;
        let audio_format = u16_at(data, 20);
        if audio_format != FORMAT_PCM {
            return Err(WavError::UnsupportedFormat(audio_format));
        }
        let bits_per_sample = u16_at(data, 34);
        if bits_per_sample != 16 {
            return Err(WavError::UnsupportedBitDepth(bits_per_sample));
        }

        // Walk to the data chunk.
        let mut pos = 20 + fmt_size + fmt_size % 2;
        loop {
            if pos + 8 > data.len() {
                return Err(WavError::BadChunkId {
                    offset: pos.min(data.len()),
                    expected: "data",
                });
            }
            let chunk_size = u32_at(data, pos + 4) as usize;
            if &data[pos..pos + 4] == b"data" {
                let available = data.len() - (pos + 8);
                if chunk_size > available {
                    return Err(WavError::Truncated {
                        declared: chunk_size,
                        available,
                    });
                }
                return Ok(Self {
                    riff_size: u32_at(data, 4),
                    channels: u16_at(data, 22),
                    sample_rate: u32_at(data, 24),
                    byte_rate: u32_at(data, 28),
                    block_align: u16_at(data, 32),
                    bits_per_sample,
                    data_size: chunk_size as u32,
                    data_offset: pos + 8,
                });
            }
            pos += 8 + chunk_size + chunk_size % 2;
        }
    }

    /// Format described by this header.
    pub fn format(&self) -> WavFormat {
        WavFormat::pcm16(self.channels, self.sample_rate)
    }

    /// Number of complete frames in the data chunk.
    pub fn frame_count(&self) -> usize {
        if self.block_align == 0 {
            return 0;
        }
        self.data_size as usize / self.block_align as usize
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Byte range of the sample data within the file.
    pub fn data_range(&self) -> std::ops::Range<usize> {
        self.data_offset..self.data_offset + self.data_size as usize
    }
}
