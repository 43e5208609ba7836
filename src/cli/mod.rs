//! CLI module for AudioCut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::toml_config::ConfigOverrides;
use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

/// AudioCut
///
/// Compiles frame-accurate trim lists into mkvmerge audio cuts, plus the
/// matching qpfile and OGM chapter file.
#[derive(Parser, Debug)]
#[command(name = "audiocut")]
#[command(about = "AudioCut - Frame-accurate audio cuts and chapters from trim lists")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Configuration file (default: ./audiocut.toml when present)
    #[arg(long, global = true, env = "AUDIOCUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// mkvmerge executable
    #[arg(long, global = true)]
    pub mkvmerge: Option<String>,

    /// Overwrite behavior for written artifacts (always, never)
    #[arg(long, default_value = "always", global = true)]
    pub overwrite: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration values given on the command line
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            mkvmerge_path: self.mkvmerge.clone(),
            temp_prefix: match &self.command {
                Commands::Cut(args) => args.temp_prefix.clone(),
                _ => None,
            },
            log_level: self.log_level,
            log_format: self.log_format,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile trims into mkvmerge command text
    Plan(args::PlanArgs),
    /// Write the qpfile and OGM chapters for the trims
    Chapters(args::ChaptersArgs),
    /// Cut an audio file with mkvmerge
    Cut(args::CutArgs),
    /// List the frames around every trim boundary
    Check(args::CheckArgs),
}
