//! Additive voice bank.
//!
//! Five sine voices plus an optional genre partial, evaluated at absolute
//! time `t` (no phase accumulation) so any frame can be computed in isolation.

use std::f64::consts::PI;

use crate::tables::ResolvedVoicing;

const TWO_PI: f64 = 2.0 * PI;

/// Melody drifts around the base frequency by this many Hz.
const MELODY_DRIFT_HZ: f64 = 100.0;
/// Angular rate of the melody drift, before the tempo multiplier.
const MELODY_DRIFT_RATE: f64 = 0.5;

const MELODY_GAIN: f64 = 0.3;
/// Major third above the melody.
const HARMONY_THIRD_RATIO: f64 = 1.25;
const HARMONY_THIRD_GAIN: f64 = 0.2;
/// Perfect fifth above the melody.
const HARMONY_FIFTH_RATIO: f64 = 1.5;
const HARMONY_FIFTH_GAIN: f64 = 0.15;
/// Bass sits an octave under the base frequency.
const BASS_RATIO: f64 = 0.5;
const BASS_GAIN: f64 = 0.4;
/// Rhythm pulse frequency per unit of tempo.
const RHYTHM_HZ: f64 = 2.0;
const RHYTHM_GAIN: f64 = 0.1;
/// The right channel carries a softer copy of the genre partial.
const RIGHT_EFFECT_SCALE: f64 = 0.8;

#[inline]
fn sine(freq: f64, t: f64) -> f64 {
    (TWO_PI * freq * t).sin()
}

/// Precomputed voice constants for one song.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VoiceBank {
    base_freq: f64,
    tempo_mod: f64,
    effect: Option<(f64, f64)>,
}

impl VoiceBank {
    pub(crate) fn new(voicing: &ResolvedVoicing) -> Self {
        Self {
            base_freq: voicing.base_freq,
            tempo_mod: voicing.tempo_mod,
            effect: voicing.genre_effect.partial(),
        }
    }

    /// Melody frequency at time `t`.
    #[inline]
    pub(crate) fn melody_freq(&self, t: f64) -> f64 {
        self.base_freq + (t * MELODY_DRIFT_RATE * self.tempo_mod).sin() * MELODY_DRIFT_HZ
    }

    /// Unenveloped, unclamped (left, right) pair at time `t`.
    #[inline]
    pub(crate) fn raw_frame(&self, t: f64) -> (f64, f64) {
        let melody_freq = self.melody_freq(t);

        let melody = sine(melody_freq, t) * MELODY_GAIN;
        let third = sine(melody_freq * HARMONY_THIRD_RATIO, t) * HARMONY_THIRD_GAIN;
        let fifth = sine(melody_freq * HARMONY_FIFTH_RATIO, t) * HARMONY_FIFTH_GAIN;
        let bass = sine(self.base_freq * BASS_RATIO, t) * BASS_GAIN;
        let rhythm = sine(RHYTHM_HZ * self.tempo_mod, t) * RHYTHM_GAIN;

        let effect = match self.effect {
            Some((ratio, gain)) => sine(melody_freq * ratio, t) * gain,
            None => 0.0,
        };

        // Summation order is kept fixed so output stays bit-stable.
        let left = melody + third + bass + rhythm + effect;
        let right = melody + fifth + bass + rhythm + effect * RIGHT_EFFECT_SCALE;
        (left, right)
    }
}
