//! Generate command implementation
//!
//! Builds a song request, shows staged progress while the song renders on a
//! blocking task, and writes the WAV file plus a JSON report.
//!
//! Ctrl+C is observed from the start of rendering until the outputs are on
//! disk. A cancelled run removes any files it already wrote.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

use songforge_synth::{render_song, RenderedSong, SongRequest, SynthError};

use super::json_output::{error_codes, GenerateOutput, JsonError};
use crate::config::{ConfigOverrides, GeneratorConfig};
use crate::progress::{self, StageUpdate};

/// Exit code for an interrupted generation (128 + SIGINT).
pub const EXIT_CANCELLED: u8 = 130;

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Request file (JSON `SongRequest`); individual fields override it.
    pub request_path: Option<PathBuf>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub duration: Option<String>,
    pub vocal_type: Option<String>,
    pub version: Option<String>,
    pub lyrics: Option<String>,
    /// Configuration file.
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    /// Emit machine-readable JSON.
    pub json: bool,
}

/// Files written for a rendered song.
#[derive(Debug, Clone)]
pub struct WrittenSong {
    pub wav_path: PathBuf,
    pub report_path: Option<PathBuf>,
}

enum Outcome {
    Written(RenderedSong, WrittenSong),
    Cancelled,
}

/// Loads the request file (if any) and applies field flags on top.
pub fn build_request(options: &GenerateOptions) -> Result<SongRequest> {
    let mut request = match options.request_path {
        Some(ref path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read request file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse request file: {}", path.display()))?
        }
        None => SongRequest::default(),
    };

    let fields = [
        (&options.title, &mut request.title),
        (&options.artist, &mut request.artist),
        (&options.genre, &mut request.genre),
        (&options.mood, &mut request.mood),
        (&options.duration, &mut request.duration),
        (&options.vocal_type, &mut request.vocal_type),
        (&options.version, &mut request.version),
        (&options.lyrics, &mut request.lyrics),
    ];
    for (flag, field) in fields {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }

    Ok(request)
}

/// Writes the WAV file and, if enabled, the report next to it.
pub fn write_outputs(song: &RenderedSong, config: &GeneratorConfig) -> Result<WrittenSong> {
    let out_root = &config.out_root;
    fs::create_dir_all(out_root)
        .with_context(|| format!("Failed to create output directory: {}", out_root.display()))?;

    let wav_path = out_root.join(&song.report.file_name);
    song.audio
        .save(&wav_path)
        .with_context(|| format!("Failed to write WAV file: {}", wav_path.display()))?;

    let report_path = if config.write_report {
        let path = wav_path.with_extension("report.json");
        let json = serde_json::to_string_pretty(&song.report)
            .context("Failed to serialize song report")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    tracing::debug!(wav = %wav_path.display(), "outputs written");
    Ok(WrittenSong {
        wav_path,
        report_path,
    })
}

/// Removes the files written by a cancelled run.
fn discard_outputs(written: &WrittenSong) {
    let paths = std::iter::once(&written.wav_path).chain(written.report_path.as_ref());
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove output");
        }
    }
}

/// Renders and writes the song while the Ctrl+C handler is installed.
///
/// Ctrl+C stops the stages, raises the synthesis cancel flag and discards
/// outputs that were written before the flag was seen.
async fn render_with_progress(
    request: SongRequest,
    config: &GeneratorConfig,
    on_stage: impl FnMut(&StageUpdate),
) -> Result<Outcome> {
    let cancel = Arc::new(AtomicBool::new(false));
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let signal_flag = Arc::clone(&cancel);
    let signal_task = tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            signal_flag.store(true, Ordering::Relaxed);
            let _ = cancel_tx.send(true);
        }
    });

    let outcome = render_and_write(request, config, &cancel, cancel_rx, on_stage).await;
    signal_task.abort();
    outcome
}

async fn render_and_write(
    request: SongRequest,
    config: &GeneratorConfig,
    cancel: &Arc<AtomicBool>,
    cancel_rx: watch::Receiver<bool>,
    on_stage: impl FnMut(&StageUpdate),
) -> Result<Outcome> {
    let render_flag = Arc::clone(cancel);
    let sample_rate = config.sample_rate;
    let render = tokio::task::spawn_blocking(move || {
        render_song(&request, sample_rate, Some(render_flag.as_ref()))
    });

    let stages_completed = progress::run_stages(config.stage_delay(), cancel_rx, on_stage).await;
    let rendered = render.await.context("synthesis task panicked")?;

    if !stages_completed || cancel.load(Ordering::Relaxed) {
        return Ok(Outcome::Cancelled);
    }
    let song = match rendered {
        Ok(song) => song,
        Err(SynthError::Cancelled { .. }) => return Ok(Outcome::Cancelled),
        Err(e) => return Err(e).context("Failed to render song"),
    };

    // Off the runtime thread, so the signal task can run during the write.
    let write_config = config.clone();
    let (song, written) = tokio::task::spawn_blocking(move || {
        write_outputs(&song, &write_config).map(|written| (song, written))
    })
    .await
    .context("output task panicked")??;

    if cancel.load(Ordering::Relaxed) {
        discard_outputs(&written);
        return Ok(Outcome::Cancelled);
    }
    Ok(Outcome::Written(song, written))
}

fn block_on_render(
    request: SongRequest,
    config: &GeneratorConfig,
    on_stage: impl FnMut(&StageUpdate),
) -> Result<Outcome> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    rt.block_on(render_with_progress(request, config, on_stage))
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 invalid request or config, 2 generation error,
/// 130 cancelled
pub fn run(options: &GenerateOptions) -> Result<ExitCode> {
    if options.json {
        run_json(options)
    } else {
        run_human(options)
    }
}

/// Run generate with human-readable (colored) output
fn run_human(options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();

    let config = GeneratorConfig::load_or_default(options.config_path.as_deref())?
        .with_overrides(&options.overrides);
    config.validate()?;
    let request = build_request(options)?;

    if let Err(SynthError::InvalidRequest { missing }) = request.validate() {
        eprintln!(
            "{} Missing required fields: {}",
            "error:".red().bold(),
            missing.join(", ")
        );
        return Ok(ExitCode::from(1));
    }

    println!(
        "{} \"{}\" by {}",
        "Generating:".cyan().bold(),
        request.title,
        request.artist
    );
    println!(
        "{} {} / {} / {}",
        "Voicing:".dimmed(),
        request.genre,
        if request.mood.is_empty() { "-" } else { request.mood.as_str() },
        request.duration
    );
    println!("{} {} Hz", "Sample rate:".dimmed(), config.sample_rate);

    let outcome = block_on_render(request, &config, |update| {
        println!(
            "  {} [{:>3}%] {}",
            "~".cyan(),
            update.percent,
            update.label
        );
    });

    let (song, written) = match outcome {
        Ok(Outcome::Written(song, written)) => (song, written),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            return Ok(ExitCode::from(2));
        }
        Ok(Outcome::Cancelled) => {
            eprintln!("{} Generation cancelled", "!".yellow());
            return Ok(ExitCode::from(EXIT_CANCELLED));
        }
    };

    println!(
        "\n{} {}",
        "Wrote:".green().bold(),
        written.wav_path.display()
    );
    if let Some(ref report_path) = written.report_path {
        println!("{} {}", "Report:".green().bold(), report_path.display());
    }
    println!(
        "{} {}s, {} frames, {} bytes",
        "Audio:".dimmed(),
        song.report.duration_seconds,
        song.report.frame_count,
        song.report.byte_length
    );
    println!("{} {}", "PCM hash:".dimmed(), song.report.pcm_hash);
    if config.data_uri {
        println!("{}\n{}", "Data URI:".dimmed(), song.audio.data_uri());
    }
    println!(
        "\n{} in {}ms",
        "Song generated".green().bold(),
        start.elapsed().as_millis()
    );

    Ok(ExitCode::SUCCESS)
}

fn print_json(output: &GenerateOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}

/// Run generate with machine-readable JSON output
fn run_json(options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let elapsed = || start.elapsed().as_millis() as u64;

    let config = match GeneratorConfig::load_or_default(options.config_path.as_deref())
        .and_then(|c| {
            let c = c.with_overrides(&options.overrides);
            c.validate().map(|_| c)
        }) {
        Ok(config) => config,
        Err(e) => {
            let error = JsonError::new(error_codes::INVALID_CONFIG, format!("{:#}", e));
            print_json(&GenerateOutput::failure(vec![error], elapsed()))?;
            return Ok(ExitCode::from(1));
        }
    };

    let request = match build_request(options) {
        Ok(request) => request,
        Err(e) => {
            let error = JsonError::new(error_codes::JSON_PARSE, format!("{:#}", e));
            print_json(&GenerateOutput::failure(vec![error], elapsed()))?;
            return Ok(ExitCode::from(1));
        }
    };

    if let Err(SynthError::InvalidRequest { missing }) = request.validate() {
        let errors = missing
            .iter()
            .map(|field| {
                JsonError::for_field(
                    error_codes::INVALID_REQUEST,
                    field,
                    format!("{} is required", field),
                )
            })
            .collect();
        print_json(&GenerateOutput::failure(errors, elapsed()))?;
        return Ok(ExitCode::from(1));
    }

    let outcome = match block_on_render(request, &config, |_| {}) {
        Ok(outcome) => outcome,
        Err(e) => {
            let error = JsonError::new(error_codes::GENERATION_ERROR, format!("{:#}", e));
            print_json(&GenerateOutput::failure(vec![error], elapsed()))?;
            return Ok(ExitCode::from(2));
        }
    };

    let (song, written) = match outcome {
        Outcome::Written(song, written) => (song, written),
        Outcome::Cancelled => {
            let error = JsonError::new(error_codes::CANCELLED, "generation cancelled");
            print_json(&GenerateOutput::failure(vec![error], elapsed()))?;
            return Ok(ExitCode::from(EXIT_CANCELLED));
        }
    };

    let output = GenerateOutput {
        success: true,
        errors: Vec::new(),
        wav_path: Some(path_string(&written.wav_path)),
        report_path: written.report_path.as_deref().map(path_string),
        data_uri: config.data_uri.then(|| song.audio.data_uri()),
        report: Some(song.report),
        duration_ms: elapsed(),
    };
    print_json(&output)?;

    Ok(ExitCode::SUCCESS)
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_fill_request() {
        let options = GenerateOptions {
            title: Some("T".to_string()),
            artist: Some("A".to_string()),
            genre: Some("jazz".to_string()),
            duration: Some("1-2 minutes".to_string()),
            ..GenerateOptions::default()
        };
        let request = build_request(&options).unwrap();
        assert_eq!(
            request,
            SongRequest {
                title: "T".to_string(),
                artist: "A".to_string(),
                genre: "jazz".to_string(),
                duration: "1-2 minutes".to_string(),
                ..SongRequest::default()
            }
        );
    }

    #[test]
    fn test_flags_override_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(
            &path,
            r#"{"title":"File Title","artist":"File Artist","genre":"pop","mood":"sad","duration":"5 minutes"}"#,
        )
        .unwrap();

        let options = GenerateOptions {
            request_path: Some(path),
            mood: Some("happy".to_string()),
            ..GenerateOptions::default()
        };
        let request = build_request(&options).unwrap();
        assert_eq!(request.title, "File Title");
        assert_eq!(request.mood, "happy");
        assert_eq!(request.duration, "5 minutes");
    }

    #[test]
    fn test_bad_request_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, "{ not json").unwrap();

        let options = GenerateOptions {
            request_path: Some(path),
            ..GenerateOptions::default()
        };
        let err = build_request(&options).unwrap_err();
        assert!(err.to_string().contains("Failed to parse request file"));
    }

    #[test]
    fn test_render_with_progress_reports_every_stage() {
        let request = SongRequest {
            title: "T".to_string(),
            artist: "A".to_string(),
            genre: "rock".to_string(),
            duration: "1-2 minutes".to_string(),
            ..SongRequest::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            sample_rate: 100,
            out_root: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        };

        let mut percents = Vec::new();
        let outcome = block_on_render(request, &config, |u| percents.push(u.percent)).unwrap();

        assert_eq!(percents, vec![20, 40, 60, 80, 100]);
        match outcome {
            Outcome::Written(song, written) => {
                assert_eq!(song.report.frame_count, 9000);
                assert_eq!(written.wav_path, dir.path().join("A_T.wav"));
                assert_eq!(
                    fs::read(&written.wav_path).unwrap(),
                    song.audio.as_bytes()
                );
                assert!(written.report_path.unwrap().exists());
            }
            Outcome::Cancelled => panic!("unexpected cancellation"),
        }
    }

    #[test]
    fn test_discard_outputs_removes_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("A_T.wav");
        let report_path = dir.path().join("A_T.report.json");
        fs::write(&wav_path, b"RIFF").unwrap();
        fs::write(&report_path, "{}").unwrap();

        discard_outputs(&WrittenSong {
            wav_path: wav_path.clone(),
            report_path: Some(report_path.clone()),
        });

        assert!(!wav_path.exists());
        assert!(!report_path.exists());
    }

    #[test]
    fn test_discard_outputs_tolerates_missing_report() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("A_T.wav");
        fs::write(&wav_path, b"RIFF").unwrap();

        discard_outputs(&WrittenSong {
            wav_path: wav_path.clone(),
            report_path: None,
        });

        assert!(!wav_path.exists());
    }
}
