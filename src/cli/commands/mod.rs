//! Command implementations.

pub mod checkpoint;
pub mod completions;
pub mod list;
pub mod mutate;
pub mod status;
pub mod sync;
pub mod version;

use std::path::PathBuf;

use tokio::runtime::Runtime;

use crate::config::{load_config, ConfigOverrides, Settings};
use crate::error::{Error, Result};

/// Load the config file and resolve full settings (credentials required).
pub(crate) fn resolve_settings(
    overrides: &ConfigOverrides,
    config_path: Option<&PathBuf>,
) -> Result<Settings> {
    let file = load_config(config_path)?;
    Settings::resolve(overrides, &file)
}

/// Build the runtime that network commands block on.
pub(crate) fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))
}

/// Print up to `limit` handles, or only the count when there are more.
pub(crate) fn print_handles(label: &str, handles: &[String], limit: usize, list_kind: &str) {
    use colored::Colorize;

    println!("{} ({})", label.cyan().bold(), handles.len());
    if handles.is_empty() {
        println!("  {}", "none".dimmed());
    } else if handles.len() <= limit {
        for handle in handles {
            println!("  {handle}");
        }
    } else {
        let hint = format!("too many to list, see `followsync list {list_kind}`");
        println!("  {}", hint.dimmed());
    }
}
