//! Config file reader.
//!
//! Reads optional defaults from `~/.followsync/config.json`. Every key is
//! optional; a missing file is the same as an empty one.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk configuration (camelCase keys).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub token: Option<String>,
    pub account: Option<String>,
    pub api_url: Option<String>,
    pub page_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub time_budget_ms: Option<u64>,
    pub progress_every: Option<usize>,
    pub checkpoint_path: Option<PathBuf>,
}

/// Get the global followsync directory (`~/.followsync/`).
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".followsync"))
}

/// Default config file location.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.json"))
}

/// Load the config file at `path`.
///
/// # Errors
///
/// Returns `Error::Config` if the file exists but cannot be read or parsed.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {e}")))
}
