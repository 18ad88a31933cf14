use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::try_exists;

pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024; // 10MB
const MAX_INPUT_BYTES_CEILING: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
    /// Print a removal summary to stderr after each document.
    #[serde(default)]
    pub report: bool,
}

fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            report: false,
        }
    }
}

impl Config {
    /// Loads the config from the standard location, falling back to defaults.
    pub async fn load() -> Result<Self> {
        match Self::config_path() {
            Some(config_path) => Self::load_from(&config_path).await,
            None => Ok(Self::default()),
        }
    }

    pub async fn load_from(config_path: &Path) -> Result<Self> {
        if !try_exists(config_path).await? {
            log::debug!(
                "Config file does not exist, using defaults: {}",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = match tokio::fs::read_to_string(config_path).await {
            Ok(content) => content,
            Err(io_err) => {
                log::error!("Failed to read config file: {}", io_err);
                return Ok(Self::default());
            }
        };

        if content.trim().is_empty() {
            log::warn!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        match serde_json::from_str::<Self>(&content) {
            Ok(mut config) => {
                config.validate()?;
                log::debug!("Successfully loaded config from: {}", config_path.display());
                Ok(config)
            }
            Err(json_err) => {
                log::error!("Failed to parse config file: {}", json_err);

                // Backup broken config
                let backup_path = config_path.with_extension("bak");
                if let Err(e) = tokio::fs::copy(config_path, &backup_path).await {
                    log::warn!("Failed to backup broken config: {}", e);
                } else {
                    log::info!("Backed up broken config to: {}", backup_path.display());
                }

                Ok(Self::default())
            }
        }
    }

    /// Validate configuration values and fix invalid ones
    pub fn validate(&mut self) -> Result<()> {
        if self.max_input_bytes == 0 || self.max_input_bytes > MAX_INPUT_BYTES_CEILING {
            log::warn!(
                "Invalid max_input_bytes: {}, using default",
                self.max_input_bytes
            );
            self.max_input_bytes = DEFAULT_MAX_INPUT_BYTES;
            log::info!("Configuration validation completed with corrections");
        }
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("SVGSCRUB_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("SVGSCRUB_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "svgscrub", "svgscrub")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
