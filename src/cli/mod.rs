//! Command-line parsing.
//!
//! The server takes no subcommands; the only knob is where the YAML config lives.

use std::path::PathBuf;

use clap::Parser;

use crate::config::CONFIG;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "neo", version, about = "Potentially hazardous asteroid watch (NASA NeoWs)")]
pub struct Cli {
    /// YAML configuration file.
    #[arg(short = 'c', long, value_name = "PATH", default_value = CONFIG)]
    pub config: PathBuf,
}
