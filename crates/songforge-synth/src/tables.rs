//! Lookup tables mapping song metadata to synthesis constants.
//!
//! Every lookup is total: unknown keys resolve to a documented default.

use serde::{Deserialize, Serialize};

use crate::params::MusicParameters;

/// Duration used when the label is not recognized.
pub const DEFAULT_DURATION_SECONDS: u32 = 90;

/// Base frequency (Hz) used when the genre is not recognized.
pub const DEFAULT_BASE_FREQ: f64 = 440.0;

/// Tempo multiplier used when the mood is not recognized.
pub const DEFAULT_TEMPO_MOD: f64 = 1.0;

/// Duration labels and their length in seconds. Matched exactly.
pub const DURATIONS: &[(&str, u32)] = &[
    ("1-2 minutes", 90),
    ("3-4 minutes", 210),
    ("5 minutes", 300),
    ("6 minutes", 360),
    ("10 minutes", 600),
];

/// Genre keys (lower case) and their base frequency in Hz.
pub const GENRE_BASE_FREQS: &[(&str, f64)] = &[
    ("pop", 440.0),
    ("jazz", 330.0),
    ("rock", 523.0),
    ("classical", 261.0),
    ("electronic", 659.0),
    ("hip hop", 196.0),
    ("country", 392.0),
    ("blues", 293.0),
    ("r&b", 349.0),
    ("reggae", 246.0),
];

/// Mood keys (lower case) and their tempo multiplier.
pub const MOOD_TEMPO_MODS: &[(&str, f64)] = &[
    ("happy", 1.2),
    ("sad", 0.8),
    ("energetic", 1.5),
    ("calm", 0.6),
    ("aggressive", 1.8),
    ("romantic", 0.9),
    ("nostalgic", 0.7),
    ("uplifting", 1.3),
];

/// Resolves a duration label to seconds.
pub fn duration_seconds(label: &str) -> u32 {
    DURATIONS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|&(_, secs)| secs)
        .unwrap_or(DEFAULT_DURATION_SECONDS)
}

/// Resolves a genre to its base frequency (case-insensitive).
pub fn base_freq(genre: &str) -> f64 {
    let genre = genre.to_lowercase();
    GENRE_BASE_FREQS
        .iter()
        .find(|(key, _)| *key == genre)
        .map(|&(_, freq)| freq)
        .unwrap_or(DEFAULT_BASE_FREQ)
}

/// Resolves a mood to its tempo multiplier (case-insensitive).
pub fn tempo_mod(mood: &str) -> f64 {
    let mood = mood.to_lowercase();
    MOOD_TEMPO_MODS
        .iter()
        .find(|(key, _)| *key == mood)
        .map(|&(_, m)| m)
        .unwrap_or(DEFAULT_TEMPO_MOD)
}

/// Genre-specific extra partial added on top of the base voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreEffect {
    /// No extra partial.
    None,
    /// Flat-seventh color at 1.33x the melody frequency.
    Jazz,
    /// Octave harmonic at 2x the melody frequency.
    Electronic,
}

impl GenreEffect {
    /// Resolves the effect by substring match; "jazz" wins over "electronic".
    pub fn for_genre(genre: &str) -> Self {
        let genre = genre.to_lowercase();
        if genre.contains("jazz") {
            GenreEffect::Jazz
        } else if genre.contains("electronic") {
            GenreEffect::Electronic
        } else {
            GenreEffect::None
        }
    }

    /// Frequency ratio relative to the melody and amplitude weight.
    pub fn partial(self) -> Option<(f64, f64)> {
        match self {
            GenreEffect::None => None,
            GenreEffect::Jazz => Some((1.33, 0.1)),
            GenreEffect::Electronic => Some((2.0, 0.2)),
        }
    }
}

/// All constants resolved from a set of parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedVoicing {
    /// Song length in whole seconds.
    pub duration_seconds: u32,
    /// Base frequency in Hz.
    pub base_freq: f64,
    /// Tempo multiplier.
    pub tempo_mod: f64,
    /// Genre effect branch.
    pub genre_effect: GenreEffect,
}

impl ResolvedVoicing {
    /// Resolves every table lookup for the given parameters.
    pub fn resolve(params: &MusicParameters) -> Self {
        Self {
            duration_seconds: duration_seconds(&params.duration),
            base_freq: base_freq(&params.genre),
            tempo_mod: tempo_mod(&params.mood),
            genre_effect: GenreEffect::for_genre(&params.genre),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_labels() {
        assert_eq!(duration_seconds("1-2 minutes"), 90);
        assert_eq!(duration_seconds("3-4 minutes"), 210);
        assert_eq!(duration_seconds("5 minutes"), 300);
        assert_eq!(duration_seconds("6 minutes"), 360);
        assert_eq!(duration_seconds("10 minutes"), 600);
    }

    #[test]
    fn test_duration_is_exact_match() {
        assert_eq!(duration_seconds("10 Minutes"), 90);
        assert_eq!(duration_seconds(" 5 minutes"), 90);
        assert_eq!(duration_seconds(""), 90);
    }

    #[test]
    fn test_genre_lookup_is_case_insensitive() {
        assert_eq!(base_freq("Jazz"), 330.0);
        assert_eq!(base_freq("HIP HOP"), 196.0);
        assert_eq!(base_freq("R&B"), 349.0);
        assert_eq!(base_freq("polka"), DEFAULT_BASE_FREQ);
    }

    #[test]
    fn test_mood_lookup() {
        assert_eq!(tempo_mod("Calm"), 0.6);
        assert_eq!(tempo_mod("aggressive"), 1.8);
        assert_eq!(tempo_mod("bored"), DEFAULT_TEMPO_MOD);
    }

    #[test]
    fn test_genre_effect_substring() {
        assert_eq!(GenreEffect::for_genre("Acid Jazz"), GenreEffect::Jazz);
        assert_eq!(GenreEffect::for_genre("electronic"), GenreEffect::Electronic);
        assert_eq!(GenreEffect::for_genre("jazz electronica"), GenreEffect::Jazz);
        assert_eq!(GenreEffect::for_genre("rock"), GenreEffect::None);
    }

    #[test]
    fn test_genre_effect_partials() {
        assert_eq!(GenreEffect::None.partial(), None);
        assert_eq!(GenreEffect::Jazz.partial(), Some((1.33, 0.1)));
        assert_eq!(GenreEffect::Electronic.partial(), Some((2.0, 0.2)));
    }

    #[test]
    fn test_tables_are_lower_case() {
        let keys = GENRE_BASE_FREQS
            .iter()
            .map(|(k, _)| *k)
            .chain(MOOD_TEMPO_MODS.iter().map(|(k, _)| *k));
        for key in keys {
            assert_eq!(key, key.to_lowercase());
        }
    }
}
