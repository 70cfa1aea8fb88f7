//! JSON output types for machine-readable CLI output.
//!
//! Every command accepting `--json` prints exactly one of these documents to
//! stdout.

use serde::Serialize;

use songforge_synth::{SongReport, WavHeader};

/// Error codes for CLI operations.
///
/// Stable across releases; use them for programmatic error handling.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Song request is missing required fields
    pub const INVALID_REQUEST: &str = "CLI_003";
    /// Configuration rejected
    pub const INVALID_CONFIG: &str = "CLI_004";
    /// Synthesis or output failure
    pub const GENERATION_ERROR: &str = "CLI_005";
    /// Generation cancelled by the user
    pub const CANCELLED: &str = "CLI_006";
    /// File is not a supported WAV file
    pub const INVALID_WAV: &str = "CLI_007";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g. "CLI_003")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Offending field, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl JsonError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }

    pub fn for_field(code: &str, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wav_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SongReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
    pub duration_ms: u64,
}

impl GenerateOutput {
    pub fn failure(errors: Vec<JsonError>, duration_ms: u64) -> Self {
        Self {
            success: false,
            errors,
            wav_path: None,
            report_path: None,
            report: None,
            data_uri: None,
            duration_ms,
        }
    }
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<WavHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<PcmStats>,
    /// BLAKE3 hash (hex) of the sample data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
}

impl InspectOutput {
    pub fn failure(path: &str, error: JsonError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            path: path.to_string(),
            header: None,
            stats: None,
            pcm_hash: None,
        }
    }
}

/// Summary of the sample data of a WAV file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PcmStats {
    pub frame_count: usize,
    pub duration_seconds: f64,
    /// Largest absolute sample, as a fraction of full scale.
    pub peak: f64,
    /// Fraction of samples at full scale (+/-32767).
    pub clipped_ratio: f64,
}

/// Output of `lyrics --json`.
#[derive(Debug, Clone, Serialize)]
pub struct LyricsOutput {
    pub genre: String,
    pub lyrics: String,
}

/// One row of a lookup table.
#[derive(Debug, Clone, Serialize)]
pub struct TableEntry<T: Serialize> {
    pub key: String,
    pub value: T,
}

/// Output of `tables --json`.
#[derive(Debug, Clone, Serialize)]
pub struct TablesOutput {
    pub durations: Vec<TableEntry<u32>>,
    pub default_duration: u32,
    pub genres: Vec<TableEntry<f64>>,
    pub default_base_freq: f64,
    pub moods: Vec<TableEntry<f64>>,
    pub default_tempo_mod: f64,
}
