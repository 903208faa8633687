mod app;
mod config;
mod effects;
mod form;
mod logging;
mod ui;

use std::path::PathBuf;

use clap::Parser;

pub use app::run_app;

/// Terminal front end for browsing and managing departments.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Configuration file (RON).
    #[arg(long, default_value = config::CONFIG_FILENAME)]
    pub config: PathBuf,
}
