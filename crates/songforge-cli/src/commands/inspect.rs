//! Inspect command implementation
//!
//! Parses a WAV file and reports its header, length, peak level and PCM hash.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use songforge_synth::wav::{compute_pcm_hash, decode_pcm16};
use songforge_synth::WavHeader;

use super::json_output::{error_codes, InspectOutput, JsonError, PcmStats};

/// Full-scale 16-bit magnitude.
const FULL_SCALE: i16 = 32767;

/// Computes sample statistics for a parsed file.
pub fn pcm_stats(wav_data: &[u8], header: &WavHeader) -> PcmStats {
    let samples = decode_pcm16(&wav_data[header.data_range()]);
    let peak = samples
        .iter()
        .map(|s| s.unsigned_abs())
        .max()
        .unwrap_or(0);
    let clipped = samples
        .iter()
        .filter(|s| s.unsigned_abs() >= FULL_SCALE as u16)
        .count();

    PcmStats {
        frame_count: header.frame_count(),
        duration_seconds: header.duration_seconds(),
        peak: peak as f64 / FULL_SCALE as f64,
        clipped_ratio: if samples.is_empty() {
            0.0
        } else {
            clipped as f64 / samples.len() as f64
        },
    }
}

/// Reads and analyzes a WAV file into the `inspect --json` document.
///
/// Unreadable or invalid files produce a failed document rather than an error.
pub fn inspect_file(input: &str) -> InspectOutput {
    let path = Path::new(input);

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            let message = format!("Failed to read file: {}: {}", path.display(), e);
            return InspectOutput::failure(input, JsonError::new(error_codes::FILE_READ, message));
        }
    };

    let analyzed = WavHeader::parse(&data).and_then(|header| {
        let hash = compute_pcm_hash(&data)?;
        Ok((header, hash))
    });
    let (header, hash) = match analyzed {
        Ok(analyzed) => analyzed,
        Err(e) => {
            let error = JsonError::new(error_codes::INVALID_WAV, e.to_string());
            return InspectOutput::failure(input, error);
        }
    };
    let stats = pcm_stats(&data, &header);

    InspectOutput {
        success: true,
        errors: Vec::new(),
        path: input.to_string(),
        header: Some(header),
        stats: Some(stats),
        pcm_hash: Some(hash),
    }
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 success, 1 unreadable or invalid file
pub fn run(input: &str, json: bool) -> Result<ExitCode> {
    let output = inspect_file(input);
    let code = if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    };

    if json {
        print_json(&output)?;
        return Ok(code);
    }

    let (header, stats, hash) = match (&output.header, &output.stats, &output.pcm_hash) {
        (Some(header), Some(stats), Some(hash)) => (header, stats, hash),
        _ => {
            for error in &output.errors {
                eprintln!("{} {}", "error:".red().bold(), error.message);
            }
            return Ok(code);
        }
    };

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    println!(
        "  {} {} Hz, {} ch, {}-bit PCM",
        "Format:".dimmed(),
        header.sample_rate,
        header.channels,
        header.bits_per_sample
    );
    println!(
        "  {} {} frames ({:.3}s)",
        "Length:".dimmed(),
        stats.frame_count,
        stats.duration_seconds
    );
    println!(
        "  {} {} bytes at offset {}",
        "Data:".dimmed(),
        header.data_size,
        header.data_offset
    );
    let peak = format!("{:.1}%", stats.peak * 100.0);
    println!(
        "  {} {}",
        "Peak:".dimmed(),
        if stats.peak >= 1.0 { peak.yellow() } else { peak.green() }
    );
    if stats.clipped_ratio > 0.0 {
        println!(
            "  {} {:.3}% of samples at full scale",
            "!".yellow(),
            stats.clipped_ratio * 100.0
        );
    }
    println!("  {} {}", "PCM hash:".dimmed(), hash);

    Ok(code)
}

fn print_json(output: &InspectOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use songforge_synth::{encode, SampleBuffer};

    #[test]
    fn test_pcm_stats() {
        let buffer = SampleBuffer {
            sample_rate: 4,
            left: vec![0.0, 1.0, 0.5, -0.25],
            right: vec![0.0, -1.0, 0.0, 0.0],
        };
        let audio = encode(&buffer);
        let header = WavHeader::parse(audio.as_bytes()).unwrap();
        let stats = pcm_stats(audio.as_bytes(), &header);

        assert_eq!(stats.frame_count, 4);
        assert_eq!(stats.duration_seconds, 1.0);
        assert_eq!(stats.peak, 1.0);
        assert_eq!(stats.clipped_ratio, 2.0 / 8.0);
    }

    #[test]
    fn test_pcm_stats_empty() {
        let audio = encode(&SampleBuffer::silent(44100, 0));
        let header = WavHeader::parse(audio.as_bytes()).unwrap();
        let stats = pcm_stats(audio.as_bytes(), &header);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.clipped_ratio, 0.0);
    }
}
