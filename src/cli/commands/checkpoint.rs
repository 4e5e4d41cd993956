//! Checkpoint command implementation.
//!
//! Neither subcommand needs credentials; only the checkpoint path is resolved.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::checkpoint::{CheckpointStore, FileCheckpointStore};
use crate::cli::CheckpointCommands;
use crate::config::{load_config, resolve_checkpoint_path, ConfigOverrides};
use crate::error::Result;
use crate::model::Checkpoint;

#[derive(Serialize)]
struct ShowOutput<'a> {
    path: String,
    checkpoint: Option<&'a Checkpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid: Option<String>,
}

#[derive(Serialize)]
struct ClearOutput {
    path: String,
    removed: bool,
}

/// Execute checkpoint commands.
///
/// # Errors
///
/// Returns an error if the config file is malformed or the checkpoint
/// cannot be deleted. An unreadable checkpoint is reported, not raised.
pub fn execute(
    command: &CheckpointCommands,
    overrides: &ConfigOverrides,
    config_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let file = load_config(config_path)?;
    let mut store = FileCheckpointStore::new(resolve_checkpoint_path(overrides, &file));

    match command {
        CheckpointCommands::Show => show(&store, json),
        CheckpointCommands::Clear => clear(&mut store, json),
    }
}

fn show(store: &FileCheckpointStore, json: bool) -> Result<()> {
    let path = store.path().display().to_string();
    let (checkpoint, invalid) = match store.load() {
        Ok(checkpoint) => {
            let invalid = checkpoint.as_ref().and_then(|c| c.validate().err());
            (checkpoint, invalid)
        }
        Err(e) => (None, Some(format!("unreadable: {e}"))),
    };

    if json {
        let output = ShowOutput {
            path,
            checkpoint: checkpoint.as_ref(),
            invalid,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let Some(checkpoint) = checkpoint else {
        match invalid {
            Some(reason) => println!(
                "{} Checkpoint at {path} is {reason}; the next sync will start fresh",
                "!".yellow()
            ),
            None => println!("No checkpoint at {path}"),
        }
        return Ok(());
    };

    println!("Checkpoint {}", path.bold());
    println!("  Phase:    {}", checkpoint.phase);
    println!(
        "  Unfollow: {}/{}",
        checkpoint.unfollow_index,
        checkpoint.unfollow_list.len()
    );
    println!(
        "  Follow:   {}/{}",
        checkpoint.follow_index,
        checkpoint.follow_list.len()
    );
    println!("  Saved:    {}", checkpoint.saved_at.to_rfc3339());
    if let Some(reason) = invalid {
        println!(
            "  {} inconsistent ({reason}); the next sync will start fresh",
            "!".yellow()
        );
    }
    Ok(())
}

fn clear(store: &mut FileCheckpointStore, json: bool) -> Result<()> {
    let path = store.path().display().to_string();
    let removed = store.has();
    store.delete()?;

    if json {
        println!("{}", serde_json::to_string(&ClearOutput { path, removed })?);
    } else if removed {
        println!("{} Removed {path}", "✓".green());
    } else {
        println!("No checkpoint at {path}");
    }
    Ok(())
}
