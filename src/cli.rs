use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "coach-fare", version, about = "Coach hire fare estimator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the estimate server (default)
    Start,

    /// Estimate a single trip and print the breakdown
    Quote(QuoteArgs),

    /// Reload configuration of a running server (sends SIGHUP)
    Reload {
        /// PID of the running server
        #[arg(short, long)]
        pid: u32,
    },

    /// Test configuration file validity
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

/// Raw trip fields; parsed by the same validation the HTTP form uses
#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Pickup location
    #[arg(long)]
    pub from: String,

    /// Destination
    #[arg(long)]
    pub to: String,

    /// Approximate distance in km
    #[arg(short, long, allow_hyphen_values = true)]
    pub distance: String,

    /// Number of whole days
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub days: String,

    /// Bus type (seat count)
    #[arg(short, long, default_value = "20")]
    pub bus: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}
