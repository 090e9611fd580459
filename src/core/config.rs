use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Base URL of the chat relay (the client posts to `<server_url>/chat`).
    pub server_url: Option<String>,
    /// History file location; defaults to the platform data directory.
    pub history_file: Option<PathBuf>,
    /// External speech-to-text command. Voice input is unsupported when unset.
    pub voice_command: Option<String>,
    /// Spoken-language locale passed to the recognizer (e.g., "vi-VN").
    pub voice_locale: Option<String>,
    /// Log file for diagnostics; nothing is logged when unset.
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        let proj_dirs =
            ProjectDirs::from("", "", "gemchat").expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    pub fn default_history_path() -> PathBuf {
        let proj_dirs =
            ProjectDirs::from("", "", "gemchat").expect("Failed to determine data directory");
        proj_dirs.data_dir().join("history.json")
    }
}
