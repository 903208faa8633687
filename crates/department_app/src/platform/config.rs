use std::fs;
use std::path::Path;
use std::time::Duration;

use department_core::CurrentUser;
use department_engine::ServiceSettings;
use department_logging::{dept_info, dept_warn, LogDestination};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "department_browser.ron";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    /// Signed-in user. Stands in for the authentication context; `None` browses anonymously.
    pub user: Option<CurrentUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ServiceConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    pub target: LogTarget,
    pub level: String,
    pub file: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let defaults = ServiceSettings::default();
        Self {
            base_url: defaults.base_url,
            connect_timeout_ms: millis(defaults.connect_timeout),
            request_timeout_ms: millis(defaults.request_timeout),
            auth_token: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::File,
            level: "info".to_string(),
            file: department_logging::DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl ServiceConfig {
    pub(crate) fn settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            auth_token: self.auth_token.clone(),
        }
    }
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Reads the configuration file. A missing file yields defaults silently;
/// an unreadable or malformed one yields defaults with a warning.
///
/// Runs before the logger exists, so warnings are returned for the caller
/// to log once logging is up.
pub(crate) fn load_config(path: &Path) -> (AppConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                Some(format!("Failed to read config from {:?}: {}", path, err)),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            AppConfig::default(),
            Some(format!("Failed to parse config from {:?}: {}", path, err)),
        ),
    }
}

pub(crate) fn report_load(path: &Path, warning: Option<String>) {
    match warning {
        Some(warning) => dept_warn!("{}; using defaults", warning),
        None => dept_info!("Configuration resolved from {:?}", path),
    }
}
