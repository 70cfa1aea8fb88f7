//! Linear fade envelope.
//!
//! Half-second linear ramps at both ends of the song, unity gain in between.

/// Slope of the fade ramps, in gain per second.
const FADE_SLOPE: f64 = 2.0;

/// Linear fade-in/fade-out envelope over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeEnvelope {
    duration_seconds: f64,
}

impl FadeEnvelope {
    /// Creates an envelope spanning `duration_seconds`.
    pub fn new(duration_seconds: f64) -> Self {
        Self { duration_seconds }
    }

    /// Gain at time `t` (seconds).
    #[inline]
    pub fn gain_at(&self, t: f64) -> f64 {
        let fade_in = (t * FADE_SLOPE).min(1.0);
        let fade_out = ((self.duration_seconds - t) * FADE_SLOPE).min(1.0);
        fade_in.min(fade_out)
    }
}
