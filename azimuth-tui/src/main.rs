mod app;
mod cli;
mod paths;
mod settings;
mod source;
mod terminal;
mod theme;

use std::fs::{self, File};

use clap::Parser;
use simplelog::{Config, WriteLogger};

use crate::app::{App, AppError};
use crate::cli::Cli;
use crate::settings::Settings;
use crate::source::DatasetSource;
use crate::terminal::Terminal;
use crate::theme::Theme;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let settings = match cli.settings.clone().or_else(paths::settings_file) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    init_logging(cli.log_level.unwrap_or(settings.log_level));
    log::info!("starting with dataset {}", cli.dataset.display());

    let mut terminal = Terminal::new(Theme::default().background)?;
    let mut app = App::new(settings, DatasetSource::new(cli.dataset));
    app.run(&mut terminal).await
}

/// Install the file logger. Failures leave logging disabled.
fn init_logging(level: log::LevelFilter) {
    let Some(cache) = paths::cache_dir() else {
        return;
    };
    if fs::create_dir_all(&cache).is_err() {
        return;
    }
    paths::rotate_logs();

    let Some(path) = paths::log_file() else {
        return;
    };
    if let Ok(file) = File::create(path) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}
