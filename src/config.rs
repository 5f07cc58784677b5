use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Server configuration, loaded from an optional YAML file with
/// environment overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds, e.g. "0.0.0.0:8080".
    pub listen_addr: String,
    /// Deadline in seconds for reading a full request. 0 disables it.
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Document root the request paths resolve against.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            read_timeout_secs: 30,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads configuration for the running process.
    ///
    /// The file path is taken from `FILAMENT_CONFIG` if set, else
    /// `filament.yaml` in the working directory if it exists, else the
    /// built-in defaults apply. `LISTEN` overrides the listen address.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match Self::config_path() {
            Some(path) => Self::load_path(&path)?,
            None => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    /// Loads and parses a specific YAML config file.
    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parses configuration from YAML text. Missing fields take defaults.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("FILAMENT_CONFIG") {
            return Some(PathBuf::from(path));
        }

        let default = Path::new("filament.yaml");
        default.exists().then(|| default.to_path_buf())
    }
}
