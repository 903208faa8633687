//! Platform logging initialization for department_app.

use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;

use super::config::LoggingConfig;

/// Initialize the logger from configuration. Unknown levels fall back to `info`.
pub fn initialize(config: &LoggingConfig) {
    let level = LevelFilter::from_str(&config.level).unwrap_or(LevelFilter::Info);
    department_logging::initialize(config.target.into(), level, Path::new(&config.file));
}
