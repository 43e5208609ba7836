//! AudioCut CLI
//!
//! Cuts the audio of a trimmed video encode with mkvmerge and writes the
//! qpfile and OGM chapters that line up with the cuts.
//!
//! # Usage
//!
//! ```bash
//! audiocut plan --trims trims.json --fps 24000/1001
//! audiocut chapters --trims trims.json --new-fps 24000/1001 --fps 30000/1001 --chapters chapters.txt
//! audiocut cut --trims trims.json --video ep01.mkv --output ep01.mka
//! audiocut check --trims trims.json --frames 34046
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use audiocut_cli::app::DefaultAppContainer;
use audiocut_cli::cli::{commands, Cli, Commands};
use audiocut_cli::config_initialization::initialize_configuration_hierarchy;
use audiocut_cli::output::OverwritePolicy;
use audiocut_cli::utils::logging::{LoggingConfig, LoggingSystem};

/// Main entry point for the AudioCut CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(cli.config.as_deref(), cli.config_overrides())
        .context("Failed to load configuration")?;

    let logging = LoggingSystem::new(LoggingConfig {
        level: config.log_level,
        format: config.log_format,
    });
    logging.initialize();
    logging.log_system_info();
    debug!(?config, "Configuration resolved");

    let overwrite = OverwritePolicy::parse(&cli.overwrite)
        .with_context(|| format!("Invalid overwrite policy: {}", cli.overwrite))?;
    let container = DefaultAppContainer::new(config).context("Failed to initialize")?;

    match cli.command {
        Commands::Plan(args) => {
            info!("Executing plan command");
            commands::plan(args, &container)?;
        }
        Commands::Chapters(args) => {
            info!("Executing chapters command");
            commands::chapters(args, overwrite)?;
        }
        Commands::Cut(args) => {
            info!("Executing cut command");
            commands::cut(args, &container).await?;
        }
        Commands::Check(args) => {
            info!("Executing check command");
            commands::check(args)?;
        }
    }

    Ok(())
}
