use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tooltip::TooltipPlacement;

pub const QUALIFIER: &str = "com";
pub const ORGANIZATION: &str = "betterread";
pub const APPLICATION: &str = "betterread";

const SETTINGS_FILE: &str = "settings.toml";
const LOG_FILE: &str = "betterread.log";

pub const MIN_PAGE_WIDTH: u16 = 20;
pub const MAX_PAGE_WIDTH: u16 = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width, in cells, pages are laid out at.
    pub page_width: u16,
    pub log_level: String,
    pub tooltip: TooltipPlacement,
    /// Show a notice when a dropped file is rejected.
    pub report_rejected_drops: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_width: 80,
            log_level: "info".into(),
            tooltip: TooltipPlacement::CELLS,
            report_rejected_drops: true,
        }
    }
}

impl Settings {
    pub fn with_page_width(mut self, width: u16) -> Self {
        self.page_width = width.clamp(MIN_PAGE_WIDTH, MAX_PAGE_WIDTH);
        self
    }
}

pub fn config_root() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|p| p.config_dir().to_path_buf())
}

pub fn settings_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn log_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join(LOG_FILE))
}

/// Settings from the config directory. A missing file yields the defaults.
pub fn load_settings() -> Result<Settings, ConfigError> {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => Ok(Settings::default()),
    }
}

pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let settings: Settings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let width = settings.page_width;
    Ok(settings.with_page_width(width))
}
