//! Song parameter and request types.

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Semantic parameters driving synthesis.
///
/// Only `genre`, `mood` and `duration` affect the waveform. Every string is
/// accepted; unknown values fall back to defaults during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicParameters {
    /// Free-text genre, matched case-insensitively.
    pub genre: String,
    /// Free-text mood, matched case-insensitively.
    pub mood: String,
    /// Duration label such as `"3-4 minutes"`.
    pub duration: String,
    /// Song title (informational).
    #[serde(default)]
    pub title: String,
    /// Artist name (informational).
    #[serde(default)]
    pub artist: String,
    /// Vocal type (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocal_type: Option<String>,
}

impl MusicParameters {
    /// Creates parameters from the three fields that shape the sound.
    pub fn new(
        genre: impl Into<String>,
        mood: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            genre: genre.into(),
            mood: mood.into(),
            duration: duration.into(),
            ..Self::default()
        }
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the artist.
    pub fn artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Sets the vocal type.
    pub fn vocal_type(mut self, vocal_type: impl Into<String>) -> Self {
        self.vocal_type = Some(vocal_type.into());
        self
    }
}

/// A full song request as collected from a user.
///
/// `title`, `artist`, `genre` and `duration` are required; see
/// [`SongRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SongRequest {
    /// Song title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Genre.
    pub genre: String,
    /// Mood.
    pub mood: String,
    /// Vocal type.
    pub vocal_type: String,
    /// Duration label.
    pub duration: String,
    /// Free-form version tag.
    pub version: String,
    /// Lyrics; empty means "generate canned lyrics".
    pub lyrics: String,
}

impl SongRequest {
    /// Checks required fields, reporting all missing ones at once.
    pub fn validate(&self) -> SynthResult<()> {
        let required = [
            ("title", &self.title),
            ("artist", &self.artist),
            ("genre", &self.genre),
            ("duration", &self.duration),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SynthError::InvalidRequest { missing })
        }
    }

    /// Extracts the synthesis parameters.
    pub fn to_parameters(&self) -> MusicParameters {
        let mut params = MusicParameters::new(&self.genre, &self.mood, &self.duration)
            .title(&self.title)
            .artist(&self.artist);
        if !self.vocal_type.is_empty() {
            params = params.vocal_type(&self.vocal_type);
        }
        params
    }

    /// File stem for outputs: `{artist}_{title}` with path-hostile
    /// characters replaced by `_`.
    pub fn file_stem(&self) -> String {
        let raw = format!("{}_{}", self.artist.trim(), self.title.trim());
        raw.chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }
}
