use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_DIR_NAME: &str = ".spendboard";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How long a generated card record stays valid.
    pub refresh_interval_hours: i64,
    /// Cards synced when `sync` is called without arguments.
    pub default_cards: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval_hours: 24,
            default_cards: Vec::new(),
        }
    }
}

impl Settings {
    /// Reads `config.json` from `data_dir`; a missing file means defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let settings = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::hours(self.refresh_interval_hours.max(0))
    }
}

/// Explicit directory if given, otherwise `~/.spendboard`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DEFAULT_DIR_NAME))
        }
    }
}
