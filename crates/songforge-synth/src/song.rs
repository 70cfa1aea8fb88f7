//! End-to-end song rendering.
//!
//! Validates a [`SongRequest`], fills in lyrics, synthesizes and encodes,
//! and produces a [`SongReport`] describing the result.

use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SynthResult;
use crate::lyrics::generate_lyrics;
use crate::params::SongRequest;
use crate::synthesis::{synthesize, synthesize_with_cancel};
use crate::tables::{GenreEffect, ResolvedVoicing};
use crate::wav::{encode, EncodedAudio};

/// Metadata describing a rendered song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongReport {
    /// Request as rendered (lyrics filled in).
    pub request: SongRequest,
    /// Output file name, `{artist}_{title}.wav`.
    pub file_name: String,
    /// Song length in seconds.
    pub duration_seconds: u32,
    /// Base frequency used.
    pub base_freq: f64,
    /// Tempo multiplier used.
    pub tempo_mod: f64,
    /// Genre effect applied.
    pub genre_effect: GenreEffect,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per channel.
    pub frame_count: usize,
    /// Size of the WAV file in bytes.
    pub byte_length: usize,
    /// BLAKE3 hash of the sample data.
    pub pcm_hash: String,
}

/// A rendered song: audio plus report.
#[derive(Debug, Clone)]
pub struct RenderedSong {
    /// Encoded WAV audio.
    pub audio: EncodedAudio,
    /// Metadata describing the render.
    pub report: SongReport,
}

/// Renders a song request.
///
/// Fails only if required request fields are missing, or if `cancel` is
/// given and raised during synthesis.
pub fn render_song(
    request: &SongRequest,
    sample_rate: u32,
    cancel: Option<&AtomicBool>,
) -> SynthResult<RenderedSong> {
    request.validate()?;

    let mut request = request.clone();
    if request.lyrics.trim().is_empty() {
        request.lyrics = generate_lyrics(&request.genre).to_string();
    }

    let params = request.to_parameters();
    let voicing = ResolvedVoicing::resolve(&params);

    let buffer = match cancel {
        Some(flag) => synthesize_with_cancel(&params, sample_rate, flag)?,
        None => synthesize(&params, sample_rate),
    };
    let audio = encode(&buffer);

    let report = SongReport {
        file_name: format!("{}.wav", request.file_stem()),
        duration_seconds: voicing.duration_seconds,
        base_freq: voicing.base_freq,
        tempo_mod: voicing.tempo_mod,
        genre_effect: voicing.genre_effect,
        sample_rate: buffer.sample_rate,
        frame_count: audio.frame_count(),
        byte_length: audio.len(),
        pcm_hash: audio.pcm_hash().to_string(),
        request,
    };

    info!(
        title = %report.request.title,
        artist = %report.request.artist,
        file = %report.file_name,
        bytes = report.byte_length,
        "rendered song"
    );

    Ok(RenderedSong { audio, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    fn request() -> SongRequest {
        SongRequest {
            title: "Blue Hour".to_string(),
            artist: "Trio".to_string(),
            genre: "Jazz".to_string(),
            mood: "calm".to_string(),
            duration: "1-2 minutes".to_string(),
            ..SongRequest::default()
        }
    }

    #[test]
    fn test_render_fills_lyrics_and_report() {
        let song = render_song(&request(), 200, None).unwrap();
        let report = &song.report;

        assert_eq!(report.file_name, "Trio_Blue Hour.wav");
        assert_eq!(report.duration_seconds, 90);
        assert_eq!(report.base_freq, 330.0);
        assert_eq!(report.tempo_mod, 0.6);
        assert_eq!(report.genre_effect, GenreEffect::Jazz);
        assert_eq!(report.sample_rate, 200);
        assert_eq!(report.frame_count, 200 * 90);
        assert_eq!(report.byte_length, 44 + 200 * 90 * 4);
        assert_eq!(report.pcm_hash, song.audio.pcm_hash());
        assert!(report.request.lyrics.contains("jazzy state of mind"));
    }

    #[test]
    fn test_render_keeps_user_lyrics() {
        let req = SongRequest {
            lyrics: "la la la".to_string(),
            ..request()
        };
        let song = render_song(&req, 100, None).unwrap();
        assert_eq!(song.report.request.lyrics, "la la la");
    }

    #[test]
    fn test_render_rejects_incomplete_request() {
        let req = SongRequest {
            title: String::new(),
            ..request()
        };
        assert!(matches!(
            render_song(&req, 100, None),
            Err(SynthError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_render_honours_cancel() {
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            render_song(&request(), 100, Some(&cancel)),
            Err(SynthError::Cancelled { .. })
        ));
    }

    #[test]
    fn test_report_serializes() {
        let song = render_song(&request(), 100, None).unwrap();
        let json = serde_json::to_value(&song.report).unwrap();
        assert_eq!(json["file_name"], "Trio_Blue Hour.wav");
        assert_eq!(json["request"]["genre"], "Jazz");
        assert_eq!(json["genre_effect"], "jazz");

        let parsed: SongReport = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, song.report);
    }
}
