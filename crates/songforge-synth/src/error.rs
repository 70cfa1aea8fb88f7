//! Error types for the synthesis core.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur around song synthesis.
///
/// `synthesize` and `encode` themselves never fail. These variants cover the
/// request layer, cooperative cancellation and writing WAV files.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Synthesis was cancelled before the buffer was complete.
    #[error("synthesis cancelled after {frames_rendered} frames")]
    Cancelled {
        /// Frames written before the cancel flag was observed.
        frames_rendered: usize,
    },

    /// A song request is missing required fields.
    #[error("missing required fields: {}", missing.join(", "))]
    InvalidRequest {
        /// Names of every missing field, in declaration order.
        missing: Vec<String>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::Cancelled { .. } => "SYNTH_001",
            SynthError::InvalidRequest { .. } => "SYNTH_002",
            SynthError::Io(_) => "SYNTH_003",
        }
    }
}

/// Errors produced while parsing a WAV container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WavError {
    /// Fewer bytes than a canonical header.
    #[error("buffer too short: {len} bytes, need at least {needed}")]
    TooShort {
        /// Actual length.
        len: usize,
        /// Required length.
        needed: usize,
    },

    /// A chunk identifier did not match.
    #[error("bad chunk id at offset {offset}: expected {expected:?}")]
    BadChunkId {
        /// Byte offset of the identifier.
        offset: usize,
        /// The identifier that was expected.
        expected: &'static str,
    },

    /// Audio format tag other than PCM.
    #[error("unsupported audio format tag {0} (only PCM = 1)")]
    UnsupportedFormat(u16),

    /// Bit depth other than 16.
    #[error("unsupported bit depth {0} (only 16-bit)")]
    UnsupportedBitDepth(u16),

    /// The data chunk claims more bytes than are present.
    #[error("data chunk truncated: header declares {declared} bytes, {available} available")]
    Truncated {
        /// Size declared by the data chunk header.
        declared: usize,
        /// Bytes actually present after the header.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_lists_fields() {
        let err = SynthError::InvalidRequest {
            missing: vec!["title".to_string(), "duration".to_string()],
        };
        assert_eq!(err.to_string(), "missing required fields: title, duration");
        assert_eq!(err.code(), "SYNTH_002");
    }

    #[test]
    fn test_io_error_converts() {
        let err: SynthError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert_eq!(err.code(), "SYNTH_003");
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_cancelled_message() {
        let err = SynthError::Cancelled { frames_rendered: 10 };
        assert_eq!(err.code(), "SYNTH_001");
        assert!(err.to_string().contains("10 frames"));
    }

    #[test]
    fn test_wav_error_messages() {
        assert!(WavError::UnsupportedFormat(3)
            .to_string()
            .contains("format tag 3"));
    }
}
