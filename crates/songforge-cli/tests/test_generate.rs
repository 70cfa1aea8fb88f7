//! End-to-end tests for the generate and inspect commands.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use songforge_cli::commands::generate::{self, GenerateOptions};
use songforge_cli::commands::inspect;
use songforge_cli::config::ConfigOverrides;
use songforge_synth::{GenreEffect, SongReport, WavHeader};

fn options(out_root: &Path) -> GenerateOptions {
    GenerateOptions {
        title: Some("Night Drive".to_string()),
        artist: Some("Neon".to_string()),
        genre: Some("electronic".to_string()),
        mood: Some("energetic".to_string()),
        duration: Some("1-2 minutes".to_string()),
        overrides: ConfigOverrides {
            sample_rate: Some(200),
            out_root: Some(out_root.to_path_buf()),
            ..ConfigOverrides::default()
        },
        json: true,
        ..GenerateOptions::default()
    }
}

#[test]
fn generate_writes_wav_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let code = generate::run(&options(dir.path())).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let wav_path = dir.path().join("Neon_Night Drive.wav");
    let bytes = fs::read(&wav_path).unwrap();
    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.channels, 2);
    assert_eq!(header.sample_rate, 200);
    assert_eq!(header.bits_per_sample, 16);
    assert_eq!(header.frame_count(), 90 * 200);
    assert_eq!(bytes.len(), 44 + 90 * 200 * 4);

    let report_path = dir.path().join("Neon_Night Drive.report.json");
    let report: SongReport =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report.file_name, "Neon_Night Drive.wav");
    assert_eq!(report.duration_seconds, 90);
    assert_eq!(report.base_freq, 659.0);
    assert_eq!(report.tempo_mod, 1.5);
    assert_eq!(report.genre_effect, GenreEffect::Electronic);
    assert_eq!(report.byte_length, bytes.len());
    assert_eq!(
        report.pcm_hash,
        songforge_synth::wav::compute_pcm_hash(&bytes).unwrap()
    );
}

#[test]
fn generate_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.overrides.no_report = true;

    let code = generate::run(&opts).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(dir.path().join("Neon_Night Drive.wav").exists());
    assert!(!dir.path().join("Neon_Night Drive.report.json").exists());
}

#[test]
fn generate_rejects_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.title = None;
    opts.artist = Some("   ".to_string());

    let code = generate::run(&opts).unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn generate_rejects_zero_sample_rate() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path());
    opts.overrides.sample_rate = Some(0);

    let code = generate::run(&opts).unwrap();
    assert_eq!(code, ExitCode::from(1));
}

#[test]
fn generate_reads_request_file() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    fs::write(
        &request_path,
        r#"{"title":"Slow","artist":"Trio","genre":"jazz","mood":"calm","duration":"1-2 minutes"}"#,
    )
    .unwrap();

    let out = dir.path().join("out");
    let opts = GenerateOptions {
        request_path: Some(request_path),
        overrides: ConfigOverrides {
            sample_rate: Some(200),
            out_root: Some(out.clone()),
            ..ConfigOverrides::default()
        },
        json: true,
        ..GenerateOptions::default()
    };

    let code = generate::run(&opts).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(out.join("Trio_Slow.wav").exists());
}

#[test]
fn inspect_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    generate::run(&options(dir.path())).unwrap();

    let wav_path = dir.path().join("Neon_Night Drive.wav");
    let bytes = fs::read(&wav_path).unwrap();
    let header = WavHeader::parse(&bytes).unwrap();
    let stats = inspect::pcm_stats(&bytes, &header);
    assert_eq!(stats.frame_count, 90 * 200);
    assert_eq!(stats.duration_seconds, 90.0);
    assert!(stats.peak <= 1.0);
    assert!(stats.peak > 0.0);

    let input = wav_path.to_string_lossy().into_owned();
    assert_eq!(inspect::run(&input, true).unwrap(), ExitCode::SUCCESS);

    let report_path = dir.path().join("Neon_Night Drive.report.json");
    let report: SongReport =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    let output = inspect::inspect_file(&input);
    assert!(output.success);
    assert_eq!(output.pcm_hash.as_deref(), Some(report.pcm_hash.as_str()));

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["pcm_hash"], report.pcm_hash.as_str());
    assert_eq!(json["header"]["sample_rate"], 200);
}

#[test]
fn inspect_rejects_non_wav() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "definitely not a wav file, but long enough to have a header").unwrap();

    let input = path.to_string_lossy().into_owned();
    assert_eq!(inspect::run(&input, true).unwrap(), ExitCode::from(1));

    let output = inspect::inspect_file(&input);
    assert!(!output.success);
    assert_eq!(output.errors[0].code, "CLI_007");
    assert_eq!(output.pcm_hash, None);
}

#[test]
fn inspect_missing_file() {
    assert_eq!(
        inspect::run("/nonexistent/song.wav", true).unwrap(),
        ExitCode::from(1)
    );
}
