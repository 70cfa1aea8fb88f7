//! Deterministic 16-bit PCM WAV container.
//!
//! Writes canonical 44-byte-header RIFF/WAVE files with no timestamps or
//! optional chunks, so identical samples always produce identical bytes.
//! The header parser accepts exactly what the writer emits plus any
//! extra chunks between `fmt ` and `data`.

mod encoded;
mod format;
mod header;
mod pcm;
mod writer;


pub use encoded::{encode, EncodedAudio, WAV_MIME_TYPE};
pub use format::{WavFormat, HEADER_LEN};
pub use header::WavHeader;
pub use pcm::{compute_pcm_hash, decode_pcm16, extract_pcm_data};
pub use writer::{channels_to_pcm16, quantize, write_wav, write_wav_to_vec};
