//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::clock::TimePreset;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "turn-clock")]
#[command(about = "A two-player chess clock served over a small local HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Default minutes per side (30, 15, 10, 5 or 1)
    #[arg(short, long, default_value = "10")]
    pub minutes: u64,

    /// Tick driver period in milliseconds
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Program to run for cues; receives the cue name as its last argument
    #[arg(long)]
    pub cue_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Resolve `--minutes` to a restart menu preset
    pub fn default_preset(&self) -> Result<TimePreset, String> {
        TimePreset::from_minutes(self.minutes)
            .ok_or_else(|| format!("No {} minute preset; choose 30, 15, 10, 5 or 1", self.minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["turn-clock"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.default_preset(), Ok(TimePreset::TenMinutes));
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert_eq!(config.log_level(), "info");
        assert!(config.cue_command.is_none());
    }

    #[test]
    fn rejects_unknown_preset() {
        let config = Config::try_parse_from(["turn-clock", "--minutes", "7"]).unwrap();
        assert!(config.default_preset().is_err());
    }

    #[test]
    fn rejects_zero_tick_period() {
        assert!(Config::try_parse_from(["turn-clock", "--tick-ms", "0"]).is_err());
    }
}
