//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Terminal dashboard for browsing evaluation filters.
#[derive(Debug, Parser)]
#[command(name = "azimuth-tui", version, about)]
pub struct Cli {
    /// Dataset file: a JSON object mapping filter group to its options.
    #[arg(long)]
    pub dataset: PathBuf,

    /// Settings file. Defaults to `settings.json` in the config directory.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Log level, overriding the settings file.
    #[arg(long)]
    pub log_level: Option<LevelFilter>,
}
