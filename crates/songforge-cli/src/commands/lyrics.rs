//! Lyrics command implementation
//!
//! Prints the canned lyrics for a genre.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use songforge_synth::generate_lyrics;

use super::json_output::LyricsOutput;

/// Run the lyrics command
///
/// # Returns
/// Exit code: always 0
pub fn run(genre: &str, json: bool) -> Result<ExitCode> {
    let lyrics = generate_lyrics(genre);

    if json {
        let output = LyricsOutput {
            genre: genre.to_string(),
            lyrics: lyrics.to_string(),
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize JSON output")?;
        println!("{}", json);
    } else {
        println!("{} {}\n", "Lyrics for:".cyan().bold(), genre);
        for line in lyrics.lines() {
            if line.ends_with(':') {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
