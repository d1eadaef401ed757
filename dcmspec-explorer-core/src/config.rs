//! Configuration resolution with a fixed search-path precedence.
//!
//! The config file is `dcmspec_explorer_config.json`, looked up in order:
//! the `DCMSPEC_EXPLORER_CONFIG` environment variable, the OS user config
//! directory, the project `config/` directory, and finally the current
//! directory. When no candidate exists the built-in defaults apply and no
//! error is surfaced. Malformed files and invalid keys degrade to defaults
//! and are reported as warnings for the GUI to display.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name looked up at every search-path candidate.
pub const CONFIG_FILE_NAME: &str = "dcmspec_explorer_config.json";

/// Environment variable naming a config file; highest precedence.
pub const CONFIG_ENV_VAR: &str = "DCMSPEC_EXPLORER_CONFIG";

/// Directory name used under the OS user config and cache directories.
pub const APP_DIR_NAME: &str = "dcmspec-explorer";

/// Log levels accepted by the `log_level` config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Parse the config-file spelling, case insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session configuration, immutable after startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Cache directory shared with the external specification library.
    pub cache_dir: PathBuf,
    pub log_level: LogLevel,
    /// Start the app filtered down to the favorites view.
    pub show_favorites_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            log_level: LogLevel::Info,
            show_favorites_on_start: false,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("cache"))
}

/// Where the active config file came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    EnvVar(PathBuf),
    UserConfigDir(PathBuf),
    ProjectConfigDir(PathBuf),
    CurrentDir(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::EnvVar(p)
            | Self::UserConfigDir(p)
            | Self::ProjectConfigDir(p)
            | Self::CurrentDir(p) => Some(p),
            Self::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(p) => write!(f, "{} ({})", p.display(), CONFIG_ENV_VAR),
            Self::UserConfigDir(p) => write!(f, "{} (user config dir)", p.display()),
            Self::ProjectConfigDir(p) => write!(f, "{} (project config dir)", p.display()),
            Self::CurrentDir(p) => write!(f, "{} (current dir)", p.display()),
            Self::Defaults => f.write_str("none (using defaults)"),
        }
    }
}

/// Result of a config load: the effective config, where it came from, and
/// any warnings the GUI should surface.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: AppConfig,
    pub source: ConfigSource,
    pub warnings: Vec<String>,
}

impl ConfigLoad {
    /// Directory for persistent user data (favorites), kept alongside the
    /// active config file. Falls back to the OS user config dir when the
    /// session runs on defaults.
    pub fn user_data_dir(&self) -> PathBuf {
        match self.source.path().and_then(Path::parent) {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Serde shape of the config file. Every key is optional so a partial file
/// yields per-key defaults rather than an error.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    cache_dir: Option<PathBuf>,
    log_level: Option<String>,
    show_favorites_on_start: Option<bool>,
}

/// Pick the first existing candidate in precedence order.
///
/// Split out from [`load`] so the precedence chain is testable without
/// touching process-wide environment state.
pub fn resolve_config_file(
    env_override: Option<&Path>,
    user_config_dir: Option<&Path>,
    project_root: Option<&Path>,
    current_dir: &Path,
) -> ConfigSource {
    if let Some(path) = env_override {
        if path.is_file() {
            return ConfigSource::EnvVar(path.to_path_buf());
        }
    }
    if let Some(dir) = user_config_dir {
        let path = dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        if path.is_file() {
            return ConfigSource::UserConfigDir(path);
        }
    }
    if let Some(root) = project_root {
        let path = root.join("config").join(CONFIG_FILE_NAME);
        if path.is_file() {
            return ConfigSource::ProjectConfigDir(path);
        }
    }
    let path = current_dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        return ConfigSource::CurrentDir(path);
    }
    ConfigSource::Defaults
}

/// Walk up from `start` to the first directory containing `marker`.
pub fn find_project_root(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(marker).is_file() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Resolve and load the application configuration.
///
/// Never fails: a missing file means defaults, a malformed file means
/// defaults plus a warning on the returned [`ConfigLoad`].
pub fn load() -> ConfigLoad {
    let env_override = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_root = find_project_root(&current_dir, "Cargo.toml");

    let source = resolve_config_file(
        env_override.as_deref(),
        dirs::config_dir().as_deref(),
        project_root.as_deref(),
        &current_dir,
    );
    load_from(source)
}

/// Load the config from an already resolved source.
pub fn load_from(source: ConfigSource) -> ConfigLoad {
    let mut warnings = Vec::new();

    let raw = match source.path() {
        Some(path) => match read_raw(path) {
            Ok(raw) => raw,
            Err(err) => {
                warnings.push(format!(
                    "Config file {} could not be read ({err}); using defaults",
                    path.display()
                ));
                RawConfig::default()
            }
        },
        None => RawConfig::default(),
    };

    let defaults = AppConfig::default();
    let log_level = match raw.log_level.as_deref() {
        Some(text) => match LogLevel::parse(text) {
            Some(level) => level,
            None => {
                warnings.push(format!(
                    "Invalid log_level {text:?} in config; using {}",
                    defaults.log_level
                ));
                defaults.log_level
            }
        },
        None => defaults.log_level,
    };

    let config = AppConfig {
        cache_dir: raw.cache_dir.unwrap_or(defaults.cache_dir),
        log_level,
        show_favorites_on_start: raw
            .show_favorites_on_start
            .unwrap_or(defaults.show_favorites_on_start),
    };

    ConfigLoad { config, source, warnings }
}

fn read_raw(path: &Path) -> crate::Result<RawConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
