//! Configuration schema for ticket-store
//!
//! Configuration is stored at `~/.config/ticket-store/config.toml`

use crate::store::{TimeScale, DEFAULT_FILE_MODE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Ticket store settings
    pub store: StoreConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl GeneralConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Ticket store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Ticket file used when --file is not given
    pub path: Option<PathBuf>,

    /// Clock units per second (1000000 for microseconds)
    pub time_unit_scale: TimeScale,

    /// Unix permissions of saved ticket files
    pub file_mode: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            time_unit_scale: TimeScale::default(),
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}
