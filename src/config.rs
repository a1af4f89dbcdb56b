// File: ./src/config.rs
use crate::storage::{LocalStorage, STORAGE_KEY};
use crate::view::DEFAULT_EMPTY_MESSAGE;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub empty_message: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: STORAGE_KEY.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "dragdo", "dragdo").map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Loads the user config, or defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::get_path().context("No config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        LocalStorage::atomic_write(path, toml_str)?;
        Ok(())
    }

    /// Directory holding the stored list and the log file.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => LocalStorage::default_dir().context("No data directory available"),
        }
    }

    pub fn storage(&self) -> Result<LocalStorage> {
        Ok(LocalStorage::new(self.data_dir()?, &self.storage_key))
    }
}
