mod app;
mod error;
mod paths;
mod settings;
mod terminal;

use std::fs::{self, File};

use simplelog::{Config, WriteLogger};

use crate::app::App;
use crate::error::{DemoError, DemoResult};
use crate::settings::DemoSettings;
use crate::terminal::Terminal;

fn init_logging(settings: &DemoSettings) -> DemoResult<()> {
    paths::rotate_logs();

    let path = paths::log_file().ok_or(DemoError::NoConfigDir)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = File::create(&path)?;
    WriteLogger::init(settings.level_filter(), Config::default(), log_file)?;
    log::info!("logging to {}", path.display());
    Ok(())
}

fn run() -> DemoResult<()> {
    let settings = DemoSettings::load()?;
    init_logging(&settings)?;

    let mut terminal = Terminal::new()?;
    let (width, height) = terminal.size()?;
    let mut app = App::new(settings, width, height);
    app.run(&mut terminal)
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
