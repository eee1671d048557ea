//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{RunCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Build, stage and deliver firmware for OTA updates
#[derive(Debug, Parser, Clone)]
#[command(name = "ota-deploy")]
#[command(author = "ota-deploy Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Build, stage and deliver firmware for OTA updates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to deployment configuration file (default: <project-dir>/deploy.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project directory (default: current directory)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build, stage and deliver the firmware
    Run(RunCommand),

    /// Validate the deployment configuration
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
