//! Encoded song audio.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::SynthResult;

use super::format::{WavFormat, HEADER_LEN};
use super::writer::{channels_to_pcm16, write_wav, write_wav_to_vec};

/// MIME type of the encoded container.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// A complete in-memory WAV file plus derived metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    bytes: Vec<u8>,
    format: WavFormat,
    frame_count: usize,
    pcm_hash: String,
}

impl EncodedAudio {
    /// Complete WAV file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the value, returning the WAV bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total byte length, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the file holds no sample data.
    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Container format.
    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// Frames in the data chunk.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Sample data only, without the header.
    pub fn pcm_data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// BLAKE3 hash (hex) of the sample data.
    pub fn pcm_hash(&self) -> &str {
        &self.pcm_hash
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count as f64 / self.format.sample_rate as f64
    }

    /// Playable `data:` URI embedding the whole file as base64.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", WAV_MIME_TYPE, STANDARD.encode(&self.bytes))
    }

    /// Writes the WAV file to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> SynthResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_wav(&mut writer, &self.format, self.pcm_data())?;
        writer.flush()?;
        debug!(path = %path.display(), bytes = self.len(), "saved WAV");
        Ok(())
    }
}

/// Encodes a sample buffer as a 16-bit PCM WAV file.
///
/// Pure and deterministic: identical buffers yield identical bytes.
pub fn encode(buffer: &SampleBuffer) -> EncodedAudio {
    let format = WavFormat::pcm16(buffer.channel_count(), buffer.sample_rate);
    let frame_count = buffer.frame_count();

    let pcm = channels_to_pcm16(&buffer.channels());
    let pcm_hash = blake3::hash(&pcm).to_hex().to_string();

    let bytes = write_wav_to_vec(&format, &pcm);

    debug!(
        sample_rate = format.sample_rate,
        channels = format.channels,
        frames = frame_count,
        bytes = bytes.len(),
        "encoded WAV"
    );

    EncodedAudio {
        bytes,
        format,
        frame_count,
        pcm_hash,
    }
}
