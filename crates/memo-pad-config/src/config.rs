/// Application configuration: load, save and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Largest accepted ring capacity for the undo history.
pub const MAX_UNDO_CAPACITY: usize = 100_000;

const DEFAULT_LOG_FILTER: &str = "info";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ring capacity of the undo history. 0 = unbounded.
    pub undo_capacity: usize,
    /// Whether editor sessions are stored on disk between runs.
    pub persist_history: bool,
    /// Directory holding the history database. Empty = platform default.
    pub data_dir: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            undo_capacity: 0,
            persist_history: true,
            data_dir: String::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `memo-pad.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("memo-pad.json")))
            .unwrap_or_else(|| PathBuf::from("memo-pad.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file.
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// The configured data directory, if one is set.
    pub fn data_dir(&self) -> Option<PathBuf> {
        if self.data_dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.data_dir))
        }
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.undo_capacity = self.undo_capacity.min(MAX_UNDO_CAPACITY);
        self.data_dir = self.data_dir.trim().to_string();
        self.log_filter = self.log_filter.trim().to_string();
        if self.log_filter.is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
    }
}
