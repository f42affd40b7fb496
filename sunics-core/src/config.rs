//! sunics configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_SEARCH_URL, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{SunicsError, SunicsResult};
use crate::i18n::Language;

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/sunics/config.toml
///
/// Every field is optional; a missing file means all defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default)]
    pub language: Language,

    /// Where downloaded calendars are saved. Defaults to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_url: default_server_url(),
            search_url: default_search_url(),
            language: Language::default(),
            output_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn config_path() -> SunicsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SunicsError::Config("Could not determine config directory".into()))?
            .join("sunics");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> SunicsResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> SunicsResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SunicsError::Config(format!("Could not read config file: {e}")))?;
        toml::from_str(&content).map_err(|e| SunicsError::Config(e.to_string()))
    }

    pub fn server_url(&self) -> SunicsResult<Url> {
        Url::parse(&self.server_url)
            .map_err(|e| SunicsError::Config(format!("Invalid server_url '{}': {e}", self.server_url)))
    }

    pub fn search_url(&self) -> SunicsResult<Url> {
        Url::parse(&self.search_url)
            .map_err(|e| SunicsError::Config(format!("Invalid search_url '{}': {e}", self.search_url)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Download directory with `~` expanded. Defaults to the working directory.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned()),
            None => PathBuf::from("."),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SunicsResult<()> {
        let contents = format!(
            "\
# sunics configuration

# Backend serving POST /generate:
# server_url = \"{}\"

# Place search endpoint (Nominatim-compatible):
# search_url = \"{}\"

# Interface language, \"de\" or \"en\":
# language = \"de\"

# Where downloaded calendars are saved:
# output_dir = \"~/Downloads\"

# Request timeout in seconds:
# timeout_secs = {}
",
            DEFAULT_SERVER_URL, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SunicsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SunicsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
