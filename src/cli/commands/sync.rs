//! Sync command implementation.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;
use tracing::warn;

use super::{print_handles, resolve_settings, runtime};
use crate::api::{GitHubClient, Mutation, RelationshipSource};
use crate::checkpoint::{CheckpointStore, FileCheckpointStore};
use crate::config::{ConfigOverrides, Settings};
use crate::error::{Error, Result};
use crate::pacing::FixedDelay;
use crate::reconcile::Plan;
use crate::sync::{SyncController, SyncOutcome, SyncStatus};

/// Relationship counts fetched after a completed pass.
#[derive(Serialize)]
struct FinalCounts {
    followers: usize,
    following: usize,
}

#[derive(Serialize)]
struct SyncOutput<'a> {
    account: &'a str,
    #[serde(flatten)]
    outcome: &'a SyncOutcome,
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    totals: Option<FinalCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checkpoint: Option<String>,
}

#[derive(Serialize)]
struct DryRunOutput<'a> {
    account: &'a str,
    dry_run: bool,
    #[serde(flatten)]
    plan: &'a Plan,
    pending_checkpoint: bool,
}

/// Execute the sync command.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the HTTP client cannot
/// be built, or strict discovery fails.
pub fn execute(
    strict: bool,
    dry_run: bool,
    only: Option<Mutation>,
    overrides: &ConfigOverrides,
    config_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let settings = resolve_settings(overrides, config_path)?.with_strict_discovery(strict);
    let rt = runtime()?;

    if dry_run {
        rt.block_on(preview(&settings, only, json))
    } else {
        rt.block_on(run(settings, only, json))
    }
}

async fn run(settings: Settings, only: Option<Mutation>, json: bool) -> Result<()> {
    let api = GitHubClient::new(&settings)?;
    let store = FileCheckpointStore::new(&settings.checkpoint_path);
    let pacer = FixedDelay(settings.delay);
    let account = settings.account.clone();
    let checkpoint_path = settings.checkpoint_path.display().to_string();

    if !json {
        let scope = only.map_or_else(String::new, |m| format!(", {m} only"));
        println!(
            "Reconciling {}{scope} (pause {}ms, budget {} min)",
            account.bold(),
            settings.delay.as_millis(),
            settings.time_budget.as_secs() / 60
        );
    }

    let mut controller = SyncController::new(settings, api, store, pacer).only(only);
    let outcome = controller.run().await?;

    let totals = if outcome.status == SyncStatus::Completed {
        let followers = controller.api().fetch_followers(&account).await.len();
        let following = controller.api().fetch_following(&account).await.len();
        Some(FinalCounts {
            followers,
            following,
        })
    } else {
        None
    };

    if json {
        let output = SyncOutput {
            account: &account,
            outcome: &outcome,
            completed: outcome.completed(),
            totals,
            checkpoint: outcome.checkpoint_saved.then_some(checkpoint_path),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if outcome.resumed {
        println!("{}", "Resumed from checkpoint".dimmed());
    }
    match outcome.status {
        SyncStatus::UpToDate => {
            println!("{} Nothing to do.", "✓".green());
        }
        SyncStatus::Completed => {
            println!(
                "{} Unfollowed {}, followed {}.",
                "✓".green(),
                outcome.unfollowed_count,
                outcome.followed_count
            );
            if let Some(totals) = totals {
                println!(
                    "  Now {} followers, {} following.",
                    totals.followers, totals.following
                );
            }
        }
        SyncStatus::Interrupted => {
            println!(
                "{} Time budget reached after unfollowing {} and following {}.",
                "⏸".yellow(),
                outcome.unfollowed_count,
                outcome.followed_count
            );
            if outcome.checkpoint_saved {
                println!(
                    "  Progress saved to {checkpoint_path}. Run `followsync sync` again to continue."
                );
            } else {
                println!(
                    "  {} Could not save progress to {checkpoint_path}; the next run starts over.",
                    "!".yellow()
                );
            }
        }
    }
    Ok(())
}

/// Compute the plan without mutating anything or touching the checkpoint.
async fn preview(settings: &Settings, only: Option<Mutation>, json: bool) -> Result<()> {
    let api = GitHubClient::new(settings)?;
    let account = settings.account.as_str();

    let (followers, following) = if settings.strict_discovery {
        let followers = api
            .try_fetch_followers(account)
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;
        let following = api
            .try_fetch_following(account)
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;
        (followers, following)
    } else {
        (
            api.fetch_followers(account).await,
            api.fetch_following(account).await,
        )
    };

    let mut plan = Plan::new(&followers, &following);
    plan.restrict_to(only);
    let pending = FileCheckpointStore::new(&settings.checkpoint_path).has();
    if pending {
        warn!(path = %settings.checkpoint_path.display(), "Checkpoint present, a real run resumes it instead");
    }

    if json {
        let output = DryRunOutput {
            account,
            dry_run: true,
            plan: &plan,
            pending_checkpoint: pending,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("Dry run for {}", account.bold());
    println!();
    print_handles("Would unfollow", &plan.to_unfollow, usize::MAX, "to-unfollow");
    println!();
    print_handles("Would follow", &plan.to_follow, usize::MAX, "to-follow");
    if pending {
        println!();
        println!(
            "{} A checkpoint exists at {}; `followsync sync` will resume it rather than apply this plan.",
            "!".yellow(),
            settings.checkpoint_path.display()
        );
    }
    Ok(())
}
