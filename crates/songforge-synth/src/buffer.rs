//! Stereo sample buffer produced by the synthesizer.

/// Number of channels in every synthesized buffer.
pub const CHANNEL_COUNT: u16 = 2;

/// Planar stereo buffer of 32-bit float samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl SampleBuffer {
    /// Creates a silent buffer of `frame_count` frames.
    pub fn silent(sample_rate: u32, frame_count: usize) -> Self {
        Self {
            sample_rate,
            left: vec![0.0; frame_count],
            right: vec![0.0; frame_count],
        }
    }

    /// Number of channels (always 2).
    pub fn channel_count(&self) -> u16 {
        CHANNEL_COUNT
    }

    /// Number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Channels in output order (left, right).
    pub fn channels(&self) -> [&[f32]; 2] {
        [&self.left, &self.right]
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0f32, |peak, s| peak.max(s.abs()))
    }
}
