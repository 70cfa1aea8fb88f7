//! SongForge synthesis core
//!
//! Turns song metadata (genre, mood, duration) into a stereo waveform and
//! encodes it as a 16-bit PCM WAV file.
//!
//! # Overview
//!
//! Two stages:
//!
//! - **Synthesis** - [`synthesize`] resolves the genre, mood and duration
//!   tables and sums five additive sine voices (melody, harmony, bass,
//!   rhythm, genre partial) under a linear fade envelope.
//! - **Encoding** - [`encode`] quantizes the buffer to interleaved 16-bit PCM
//!   behind a canonical 44-byte RIFF header.
//!
//! # Determinism
//!
//! There is no randomness. Given the same parameters and sample rate, the
//! output is byte-identical across runs (on the same platform). The BLAKE3
//! hash of the PCM payload is exposed for comparisons.
//!
//! # Example
//!
//! ```
//! use songforge_synth::{encode, synthesize, MusicParameters};
//!
//! let params = MusicParameters::new("jazz", "calm", "1-2 minutes");
//! let buffer = synthesize(&params, 8000);
//! let audio = encode(&buffer);
//!
//! assert_eq!(audio.len(), 44 + 8000 * 90 * 2 * 2);
//! assert!(audio.data_uri().starts_with("data:audio/wav;base64,"));
//! ```
//!
//! # Crate Structure
//!
//! - [`params`] - Song parameters and requests
//! - [`tables`] - Genre, mood and duration lookup tables
//! - [`synthesis`] - Additive song synthesizer
//! - [`envelope`] - Fade envelope
//! - [`buffer`] - Stereo sample buffer
//! - [`wav`] - Deterministic WAV writer and header parser
//! - [`lyrics`] - Canned lyric templates
//! - [`song`] - Request-to-report rendering

pub mod buffer;
pub mod envelope;
pub mod error;
pub mod lyrics;
pub mod params;
pub mod song;
pub mod synthesis;
pub mod tables;
pub mod wav;

pub use buffer::SampleBuffer;
pub use error::{SynthError, SynthResult, WavError};
pub use lyrics::generate_lyrics;
pub use params::{MusicParameters, SongRequest};
pub use song::{render_song, RenderedSong, SongReport};
pub use synthesis::{synthesize, synthesize_with_cancel, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE};
pub use tables::{GenreEffect, ResolvedVoicing};
pub use wav::{encode, EncodedAudio, WavHeader};
