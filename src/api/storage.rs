// Local JSON persistence for the roster and bot config
// Files are overwritten in place, there is no temp-file swap

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::models::config::BotConfig;
use crate::models::member::Roster;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read a JSON document, falling back to the default on any failure
pub fn load_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        debug!("{} not found, starting empty", path.display());
        return T::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse {}: {:?}", path.display(), e);
                T::default()
            }
        },
        Err(e) => {
            error!("Failed to read {}: {:?}", path.display(), e);
            T::default()
        }
    }
}

/// Write a JSON document pretty-printed, replacing whatever was there
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

/// The two files the bot keeps on disk
#[derive(Debug, Clone)]
pub struct JsonStore {
    roster_path: PathBuf,
    config_path: PathBuf,
}

impl JsonStore {
    pub fn new(roster_path: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            roster_path: roster_path.into(),
            config_path: config_path.into(),
        }
    }

    pub fn load_roster(&self) -> Roster {
        load_json(&self.roster_path)
    }

    pub fn load_config(&self) -> BotConfig {
        load_json(&self.config_path)
    }

    pub fn save_roster(&self, roster: &Roster) -> bool {
        match save_json(&self.roster_path, roster) {
            Ok(()) => {
                debug!("Saved roster ({} members)", roster.len());
                true
            }
            Err(e) => {
                error!("Failed to save roster: {:?}", e);
                false
            }
        }
    }

    pub fn save_config(&self, config: &BotConfig) -> bool {
        match save_json(&self.config_path, config) {
            Ok(()) => {
                debug!("Saved config");
                true
            }
            Err(e) => {
                error!("Failed to save config: {:?}", e);
                false
            }
        }
    }
}
