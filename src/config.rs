//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// One week, the longest exam or retention the server accepts
const MAX_MINUTES: u64 = 7 * 24 * 60;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "exam-guard")]
#[command(about = "Hosts exam countdown sessions that auto-submit at the deadline")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Exam duration in minutes for sessions that do not supply one
    #[arg(short, long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..=MAX_MINUTES))]
    pub exam_minutes: u64,

    /// Minutes a finished session stays queryable before it is evicted
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u64).range(0..=MAX_MINUTES))]
    pub retain_minutes: u64,

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

    /// How long finished sessions are kept
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retain_minutes * 60)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
