//! Configuration management for timescribe

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Directory where model weights are stored
    pub model_dir: PathBuf,
    /// Registry id of the model to transcribe with
    pub model: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        let model_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timescribe")
            .join("models");

        Self {
            model_dir,
            model: crate::model::default_model_id().to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the transcript CSV is written, overwritten on each run
    pub csv_path: PathBuf,
    /// Directory where fetched example audio is cached
    pub assets_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let assets_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timescribe")
            .join("examples");

        Self {
            csv_path: PathBuf::from("transcript.csv"),
            assets_dir,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model settings
    pub models: ModelsConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("timescribe")
            .join("config.toml")
    }

    /// Load configuration from the default path, or return defaults
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from a specific path, or return defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(e) => {
                debug!("Config file not found at {:?}: {}", path, e);
                debug!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;

        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Format config as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.models.model, crate::model::default_model_id());
        assert_eq!(config.output.csv_path, PathBuf::from("transcript.csv"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.models.model, parsed.models.model);
        assert_eq!(config.output.csv_path, parsed.output.csv_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
[models]
model = "whisper-tiny.en"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.models.model, "whisper-tiny.en");
        // Unspecified sections fall back to defaults
        assert_eq!(config.output.csv_path, PathBuf::from("transcript.csv"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.models.model = "whisper-small.en".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.models.model, "whisper-small.en");
    }

    #[test]
    fn test_load_from_missing_path_returns_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/timescribe/config.toml"));
        assert_eq!(config.models.model, crate::model::default_model_id());
    }
}
