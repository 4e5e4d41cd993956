//! Status command implementation.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use super::{print_handles, resolve_settings, runtime};
use crate::api::{GitHubClient, RelationshipSource};
use crate::checkpoint::{CheckpointStore, FileCheckpointStore};
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::reconcile::Plan;

/// Difference lists longer than this are summarized by count.
const LIST_LIMIT: usize = 10;

#[derive(Serialize)]
struct StatusOutput<'a> {
    account: &'a str,
    followers: usize,
    following: usize,
    to_unfollow: &'a [String],
    to_follow: &'a [String],
    pending_checkpoint: bool,
}

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or output fails.
pub fn execute(overrides: &ConfigOverrides, config_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let settings = resolve_settings(overrides, config_path)?;
    let api = GitHubClient::new(&settings)?;
    let account = settings.account.as_str();

    let (followers, following) = runtime()?.block_on(async {
        (
            api.fetch_followers(account).await,
            api.fetch_following(account).await,
        )
    });
    let plan = Plan::new(&followers, &following);
    let pending_checkpoint = FileCheckpointStore::new(&settings.checkpoint_path).has();

    if json {
        let output = StatusOutput {
            account,
            followers: followers.len(),
            following: following.len(),
            to_unfollow: &plan.to_unfollow,
            to_follow: &plan.to_follow,
            pending_checkpoint,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{}", account.bold());
    println!("  Followers: {}", followers.len());
    println!("  Following: {}", following.len());
    if pending_checkpoint {
        println!(
            "  {} interrupted run pending at {}",
            "!".yellow(),
            settings.checkpoint_path.display()
        );
    }
    println!();
    print_handles("Not following back", &plan.to_unfollow, LIST_LIMIT, "to-unfollow");
    println!();
    print_handles("Not followed back", &plan.to_follow, LIST_LIMIT, "to-follow");
    Ok(())
}
