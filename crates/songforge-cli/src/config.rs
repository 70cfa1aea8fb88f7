//! Generator configuration.
//!
//! Values come from an optional JSON file and are then overridden by
//! command-line flags. Missing keys take the defaults below.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use songforge_synth::{DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE};

/// Configuration for the `generate` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Directory that receives the WAV file and report.
    pub out_root: PathBuf,
    /// Delay between progress stages, in milliseconds. 0 disables waiting.
    pub stage_delay_ms: u64,
    /// Print the playable data URI after generation.
    pub data_uri: bool,
    /// Write `{stem}.report.json` next to the WAV file.
    pub write_report: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            out_root: PathBuf::from("."),
            stage_delay_ms: 0,
            data_uri: false,
            write_report: true,
        }
    }
}

/// Flag values that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sample_rate: Option<u32>,
    pub out_root: Option<PathBuf>,
    pub stage_delay_ms: Option<u64>,
    pub data_uri: bool,
    pub no_report: bool,
}

impl GeneratorConfig {
    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(rate) = overrides.sample_rate {
            self.sample_rate = rate;
        }
        if let Some(ref root) = overrides.out_root {
            self.out_root = root.clone();
        }
        if let Some(delay) = overrides.stage_delay_ms {
            self.stage_delay_ms = delay;
        }
        self.data_uri |= overrides.data_uri;
        if overrides.no_report {
            self.write_report = false;
        }
        self
    }

    /// Rejects values the generator cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            bail!(
                "invalid sample rate: {} (expected 1..={})",
                self.sample_rate,
                MAX_SAMPLE_RATE
            );
        }
        Ok(())
    }

    /// Delay between progress stages.
    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }
}
