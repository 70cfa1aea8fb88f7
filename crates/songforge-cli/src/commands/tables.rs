//! Tables command implementation
//!
//! Lists the genre, mood and duration lookup tables with their defaults.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use songforge_synth::tables::{
    DEFAULT_BASE_FREQ, DEFAULT_DURATION_SECONDS, DEFAULT_TEMPO_MOD, DURATIONS, GENRE_BASE_FREQS,
    MOOD_TEMPO_MODS,
};

use super::json_output::{TableEntry, TablesOutput};

fn entries<T: Copy + serde::Serialize>(table: &[(&str, T)]) -> Vec<TableEntry<T>> {
    table
        .iter()
        .map(|&(key, value)| TableEntry {
            key: key.to_string(),
            value,
        })
        .collect()
}

/// Builds the tables document.
pub fn tables_output() -> TablesOutput {
    TablesOutput {
        durations: entries(DURATIONS),
        default_duration: DEFAULT_DURATION_SECONDS,
        genres: entries(GENRE_BASE_FREQS),
        default_base_freq: DEFAULT_BASE_FREQ,
        moods: entries(MOOD_TEMPO_MODS),
        default_tempo_mod: DEFAULT_TEMPO_MOD,
    }
}

/// Run the tables command
///
/// # Returns
/// Exit code: always 0
pub fn run(json: bool) -> Result<ExitCode> {
    let output = tables_output();

    if json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize JSON output")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Durations".cyan().bold());
    for entry in &output.durations {
        println!("  {:<14} {:>4}s", entry.key, entry.value);
    }
    println!("  {:<14} {:>4}s", "(other)".dimmed(), output.default_duration);

    println!("\n{}", "Genres (base frequency)".cyan().bold());
    for entry in &output.genres {
        println!("  {:<14} {:>6.1} Hz", entry.key, entry.value);
    }
    println!("  {:<14} {:>6.1} Hz", "(other)".dimmed(), output.default_base_freq);

    println!("\n{}", "Moods (tempo multiplier)".cyan().bold());
    for entry in &output.moods {
        println!("  {:<14} {:>4.1}x", entry.key, entry.value);
    }
    println!("  {:<14} {:>4.1}x", "(other)".dimmed(), output.default_tempo_mod);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_output_counts() {
        let output = tables_output();
        assert_eq!(output.durations.len(), 5);
        assert_eq!(output.genres.len(), 10);
        assert_eq!(output.moods.len(), 8);
        assert_eq!(output.default_duration, 90);
    }

    #[test]
    fn test_tables_json_keys() {
        let json = serde_json::to_value(tables_output()).unwrap();
        assert_eq!(json["durations"][4]["key"], "10 minutes");
        assert_eq!(json["durations"][4]["value"], 600);
        assert_eq!(json["genres"][1]["key"], "jazz");
    }
}
