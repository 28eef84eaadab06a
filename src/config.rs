//! Configuration and CLI argument handling

use anyhow::{bail, Result};
use clap::Parser;

use crate::presets;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "round-timer")]
#[command(about = "Interval round timer for combat-sports training")]
#[command(version)]
pub struct Config {
    /// Preset to load (see --list-presets)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Work segment length, in seconds or m:ss
    #[arg(short, long, value_parser = parse_duration)]
    pub work: Option<u64>,

    /// Rest segment length, in seconds or m:ss (0 disables rest)
    #[arg(short, long, value_parser = parse_duration)]
    pub rest: Option<u64>,

    /// Number of rounds to run
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: Option<u32>,

    /// Start the first round immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Print each snapshot as a JSON line
    #[arg(long)]
    pub json: bool,

    /// List the built-in presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Round selection resolved from the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    pub name: String,
    pub work_seconds: u64,
    pub rest_seconds: u64,
    pub rounds: u32,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the preset and explicit overrides into a round plan
    pub fn round_plan(&self) -> Result<RoundPlan> {
        let preset = match &self.preset {
            Some(id) => match presets::find(id) {
                Some(preset) => Some(preset),
                None => bail!(
                    "unknown preset '{}', expected one of: {}",
                    id,
                    presets::ids().join(", ")
                ),
            },
            None => None,
        };

        let Some(work_seconds) = self.work.or(preset.map(|p| p.work_seconds)) else {
            bail!("either --preset or --work is required");
        };

        Ok(RoundPlan {
            name: preset.map_or_else(|| "Custom".to_string(), |p| p.name.to_string()),
            work_seconds,
            rest_seconds: self.rest.or(preset.map(|p| p.rest_seconds)).unwrap_or(0),
            rounds: self.rounds.or(preset.map(|p| p.rounds)).unwrap_or(1),
        })
    }
}

/// Parse a duration given as plain seconds (`90`) or minutes and seconds (`1:30`)
pub fn parse_duration(input: &str) -> Result<u64, String> {
    let input = input.trim();
    let invalid = || format!("invalid duration '{}', expected seconds or m:ss", input);

    match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
            let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(invalid());
            }
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(invalid)
        }
        None => input.parse().map_err(|_| invalid()),
    }
}
