//! WAV file format parameters.

/// Size of the canonical header written before the sample data.
pub const HEADER_LEN: usize = 44;

/// PCM format tag in the `fmt ` chunk.
pub(crate) const FORMAT_PCM: u16 = 1;

/// Size of the PCM `fmt ` chunk body.
pub(crate) const FMT_CHUNK_LEN: u32 = 16;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 for this implementation).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// 16-bit format with the given channel count.
    pub fn pcm16(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Creates a stereo 16-bit format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::pcm16(2, sample_rate)
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per frame. Saturates at `u16::MAX`.
    pub fn block_align(&self) -> u16 {
        self.channels.saturating_mul(self.bytes_per_sample())
    }

    /// Bytes per second. Saturates at `u32::MAX`.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(self.block_align() as u32)
    }

    /// Size of the data chunk for `frames` frames.
    pub fn data_len(&self, frames: usize) -> usize {
        frames * self.block_align() as usize
    }
}
