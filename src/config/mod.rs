//! Configuration management.
//!
//! Builds the single immutable [`Settings`] value that the API client and
//! the sync controller are constructed with.
//!
//! Priority per key:
//! 1. CLI flag (clap also reads the matching environment variable)
//! 2. `~/.followsync/config.json`
//! 3. Built-in default

mod file;

pub use file::{default_config_path, global_config_dir, load_file_config, FileConfig};

use crate::error::{Error, Result};
use crate::model::is_valid_handle;
use std::path::PathBuf;
use std::time::Duration;

/// Default upstream API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default (and maximum) page size accepted by the relationship API.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default pause after each follow/unfollow call.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Default per-invocation time budget (50 minutes).
pub const DEFAULT_TIME_BUDGET_MS: u64 = 3_000_000;

/// Progress is logged every this many processed accounts.
pub const DEFAULT_PROGRESS_EVERY: usize = 10;

/// Default checkpoint file, relative to the working directory.
pub const DEFAULT_CHECKPOINT_FILE: &str = "savedata.json";

/// Values supplied on the command line (or via clap's `env` fallback).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub account: Option<String>,
    pub api_url: Option<String>,
    pub page_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub time_budget_ms: Option<u64>,
    pub checkpoint: Option<PathBuf>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Opaque bearer credential.
    pub token: String,
    /// Account whose relationships are reconciled.
    pub account: String,
    pub api_url: String,
    pub page_size: usize,
    /// Pause after every mutation call.
    pub delay: Duration,
    /// Wall-clock budget for one invocation.
    pub time_budget: Duration,
    pub progress_every: usize,
    pub checkpoint_path: PathBuf,
    /// Abort discovery on fetch errors instead of degrading to empty sets.
    pub strict_discovery: bool,
}

impl Settings {
    /// Resolve settings from overrides and a loaded config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingConfig` when no credential or account is
    /// available, and `Error::InvalidArgument` for an out-of-range page size.
    pub fn resolve(overrides: &ConfigOverrides, file: &FileConfig) -> Result<Self> {
        let token = non_empty(overrides.token.as_ref())
            .or_else(|| non_empty(file.token.as_ref()))
            .ok_or(Error::MissingConfig {
                key: "token",
                env: "GITHUB_TOKEN",
                flag: "--token",
            })?;

        let account = non_empty(overrides.account.as_ref())
            .or_else(|| non_empty(file.account.as_ref()))
            .ok_or(Error::MissingConfig {
                key: "account",
                env: "GITHUB_USERNAME",
                flag: "--account",
            })?;

        if !is_valid_handle(&account) {
            return Err(Error::InvalidArgument(format!(
                "account {account:?} is not a valid handle"
            )));
        }

        let api_url = non_empty(overrides.api_url.as_ref())
            .or_else(|| non_empty(file.api_url.as_ref()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let page_size = overrides
            .page_size
            .or(file.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=DEFAULT_PAGE_SIZE).contains(&page_size) {
            return Err(Error::InvalidArgument(format!(
                "page size {page_size} is out of range"
            )));
        }

        let delay_ms = overrides.delay_ms.or(file.delay_ms).unwrap_or(DEFAULT_DELAY_MS);
        let time_budget_ms = overrides
            .time_budget_ms
            .or(file.time_budget_ms)
            .unwrap_or(DEFAULT_TIME_BUDGET_MS);

        let progress_every = file
            .progress_every
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PROGRESS_EVERY);

        Ok(Self {
            token,
            account,
            api_url,
            page_size,
            delay: Duration::from_millis(delay_ms),
            time_budget: Duration::from_millis(time_budget_ms),
            progress_every,
            checkpoint_path: resolve_checkpoint_path(overrides, file),
            strict_discovery: false,
        })
    }

    /// Enable or disable strict discovery.
    #[must_use]
    pub fn with_strict_discovery(mut self, strict: bool) -> Self {
        self.strict_discovery = strict;
        self
    }
}

/// Resolve the checkpoint path without requiring credentials.
///
/// Used by commands that only inspect or clear the checkpoint.
#[must_use]
pub fn resolve_checkpoint_path(overrides: &ConfigOverrides, file: &FileConfig) -> PathBuf {
    overrides
        .checkpoint
        .clone()
        .or_else(|| file.checkpoint_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CHECKPOINT_FILE))
}

/// Load the config file from an explicit path or the default location.
///
/// # Errors
///
/// Propagates `Error::Config` from a malformed file.
pub fn load_config(explicit: Option<&PathBuf>) -> Result<FileConfig> {
    match explicit.cloned().or_else(default_config_path) {
        Some(path) => load_file_config(&path),
        None => Ok(FileConfig::default()),
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
