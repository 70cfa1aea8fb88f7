//! Procedural song synthesis.
//!
//! Turns [`MusicParameters`] into a stereo [`SampleBuffer`]:
//! - resolve duration, base frequency, tempo and genre effect from the tables
//! - sum the additive voices at every frame
//! - apply the fade envelope and clamp each channel to `[-1, 1]`
//!
//! The left channel carries the major third, the right channel the perfect
//! fifth, which gives the output some stereo width. Clamping happens only on
//! the final sample, so loud voicings clip.

mod voices;


use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::envelope::FadeEnvelope;
use crate::error::{SynthError, SynthResult};
use crate::params::MusicParameters;
use crate::tables::ResolvedVoicing;

use voices::VoiceBank;

/// Sample rate used when the caller passes 0.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Highest sample rate the synthesizer renders at; larger requests are clamped.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Frames rendered between checks of the cancel flag.
const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Number of frames for a duration at a sample rate.
pub fn frame_count(sample_rate: u32, duration_seconds: u32) -> usize {
    sample_rate as usize * duration_seconds as usize
}

fn effective_rate(sample_rate: u32) -> u32 {
    if sample_rate == 0 {
        DEFAULT_SAMPLE_RATE
    } else {
        sample_rate.min(MAX_SAMPLE_RATE)
    }
}

/// Synthesizes a stereo song buffer.
///
/// Total over its input: unknown genre, mood or duration fall back to the
/// table defaults, a `sample_rate` of 0 means [`DEFAULT_SAMPLE_RATE`] and
/// rates above [`MAX_SAMPLE_RATE`] are clamped to it.
/// Identical inputs produce bit-identical buffers.
pub fn synthesize(params: &MusicParameters, sample_rate: u32) -> SampleBuffer {
    let mut render = Render::prepare(params, sample_rate);
    let frames = render.buffer.frame_count();
    render.fill(0..frames);
    render.finish()
}

/// Synthesizes a stereo song buffer, stopping early if `cancel` is raised.
///
/// The flag is polled every few thousand frames. On cancellation the partial
/// buffer is dropped and [`SynthError::Cancelled`] reports how far it got.
pub fn synthesize_with_cancel(
    params: &MusicParameters,
    sample_rate: u32,
    cancel: &AtomicBool,
) -> SynthResult<SampleBuffer> {
    render_until(params, sample_rate, || cancel.load(Ordering::Relaxed))
}

/// Renders in blocks of [`CANCEL_CHECK_INTERVAL`] frames, asking
/// `should_stop` before each block.
fn render_until(
    params: &MusicParameters,
    sample_rate: u32,
    mut should_stop: impl FnMut() -> bool,
) -> SynthResult<SampleBuffer> {
    let mut render = Render::prepare(params, sample_rate);
    let frames = render.buffer.frame_count();

    let mut start = 0;
    while start < frames {
        if should_stop() {
            debug!(frames_rendered = start, "synthesis cancelled");
            return Err(SynthError::Cancelled {
                frames_rendered: start,
            });
        }
        let end = (start + CANCEL_CHECK_INTERVAL).min(frames);
        render.fill(start..end);
        start = end;
    }

    Ok(render.finish())
}

/// In-progress render of one song.
struct Render {
    bank: VoiceBank,
    envelope: FadeEnvelope,
    rate: f64,
    buffer: SampleBuffer,
}

impl Render {
    fn prepare(params: &MusicParameters, sample_rate: u32) -> Self {
        let sample_rate = effective_rate(sample_rate);
        let voicing = ResolvedVoicing::resolve(params);
        let frames = frame_count(sample_rate, voicing.duration_seconds);

        debug!(
            genre = %params.genre,
            mood = %params.mood,
            duration = %params.duration,
            duration_seconds = voicing.duration_seconds,
            base_freq = voicing.base_freq,
            tempo_mod = voicing.tempo_mod,
            genre_effect = ?voicing.genre_effect,
            sample_rate,
            frames,
            "resolved song voicing"
        );

        Self {
            bank: VoiceBank::new(&voicing),
            envelope: FadeEnvelope::new(voicing.duration_seconds as f64),
            rate: sample_rate as f64,
            buffer: SampleBuffer::silent(sample_rate, frames),
        }
    }

    fn fill(&mut self, frames: Range<usize>) {
        for i in frames {
            let t = i as f64 / self.rate;
            let (left, right) = self.bank.raw_frame(t);
            let gain = self.envelope.gain_at(t);

            self.buffer.left[i] = (left * gain).clamp(-1.0, 1.0) as f32;
            self.buffer.right[i] = (right * gain).clamp(-1.0, 1.0) as f32;
        }
    }

    fn finish(self) -> SampleBuffer {
        debug!(
            frames = self.buffer.frame_count(),
            peak = self.buffer.peak(),
            "synthesis complete"
        );
        self.buffer
    }
}
