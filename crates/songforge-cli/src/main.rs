//! SongForge CLI - Command-line interface for procedural song generation
//!
//! This binary provides commands for generating songs from metadata,
//! printing canned lyrics, inspecting WAV files and listing lookup tables.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use songforge_cli::commands;
use songforge_cli::commands::generate::GenerateOptions;
use songforge_cli::config::ConfigOverrides;

/// SongForge - Procedural Song Generation
#[derive(Parser)]
#[command(name = "songforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a song WAV file from metadata
    Generate {
        /// Song request file (JSON); flags below override its fields
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Song title
        #[arg(long)]
        title: Option<String>,

        /// Artist name
        #[arg(long)]
        artist: Option<String>,

        /// Genre (pop, jazz, rock, classical, electronic, hip hop, ...)
        #[arg(long)]
        genre: Option<String>,

        /// Mood (happy, sad, energetic, calm, ...)
        #[arg(long)]
        mood: Option<String>,

        /// Duration label ("1-2 minutes", "3-4 minutes", "5 minutes", ...)
        #[arg(long)]
        duration: Option<String>,

        /// Vocal type (informational)
        #[arg(long)]
        vocal_type: Option<String>,

        /// Version tag (informational)
        #[arg(long = "song-version")]
        song_version: Option<String>,

        /// Lyrics (default: canned lyrics for the genre)
        #[arg(long)]
        lyrics: Option<String>,

        /// Generator config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output sample rate in Hz (default: 44100)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<PathBuf>,

        /// Delay between progress stages in milliseconds (default: 0)
        #[arg(long)]
        stage_delay_ms: Option<u64>,

        /// Print a playable data URI of the WAV file
        #[arg(long)]
        data_uri: bool,

        /// Skip writing the .report.json file
        #[arg(long)]
        no_report: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print canned lyrics for a genre
    Lyrics {
        /// Genre to pick lyrics for
        #[arg(short, long)]
        genre: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect a WAV file: header, length, peak level and PCM hash
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List the genre, mood and duration lookup tables
    Tables {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            request,
            title,
            artist,
            genre,
            mood,
            duration,
            vocal_type,
            song_version,
            lyrics,
            config,
            sample_rate,
            out_root,
            stage_delay_ms,
            data_uri,
            no_report,
            json,
        } => commands::generate::run(&GenerateOptions {
            request_path: request,
            title,
            artist,
            genre,
            mood,
            duration,
            vocal_type,
            version: song_version,
            lyrics,
            config_path: config,
            overrides: ConfigOverrides {
                sample_rate,
                out_root,
                stage_delay_ms,
                data_uri,
                no_report,
            },
            json,
        }),
        Commands::Lyrics { genre, json } => commands::lyrics::run(&genre, json),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Tables { json } => commands::tables::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "songforge",
            "generate",
            "--title",
            "Blue Hour",
            "--artist",
            "Trio",
            "--genre",
            "jazz",
            "--duration",
            "1-2 minutes",
            "--sample-rate",
            "48000",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                title,
                genre,
                duration,
                sample_rate,
                json,
                data_uri,
                ..
            } => {
                assert_eq!(title.as_deref(), Some("Blue Hour"));
                assert_eq!(genre.as_deref(), Some("jazz"));
                assert_eq!(duration.as_deref(), Some("1-2 minutes"));
                assert_eq!(sample_rate, Some(48000));
                assert!(json);
                assert!(!data_uri);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_song_version_flag() {
        let cli =
            Cli::try_parse_from(["songforge", "generate", "--song-version", "v2"]).unwrap();
        match cli.command {
            Commands::Generate { song_version, .. } => {
                assert_eq!(song_version.as_deref(), Some("v2"))
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from(["songforge", "inspect", "-i", "song.wav"]).unwrap();
        match cli.command {
            Commands::Inspect { input, json } => {
                assert_eq!(input, "song.wav");
                assert!(!json);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let cli = Cli::try_parse_from(["songforge", "tables", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_requires_lyrics_genre() {
        assert!(Cli::try_parse_from(["songforge", "lyrics"]).is_err());
    }
}
