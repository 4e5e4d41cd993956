//! List command implementation.

use std::path::PathBuf;

use colored::Colorize;

use super::{resolve_settings, runtime};
use crate::api::{GitHubClient, RelationshipSource};
use crate::cli::ListKind;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::model::handles;
use crate::reconcile::{compute_to_follow, compute_to_unfollow};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or output fails.
pub fn execute(
    kind: ListKind,
    overrides: &ConfigOverrides,
    config_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let settings = resolve_settings(overrides, config_path)?;
    let api = GitHubClient::new(&settings)?;
    let account = settings.account.as_str();

    let list = runtime()?.block_on(async {
        match kind {
            ListKind::Followers => handles(&api.fetch_followers(account).await),
            ListKind::Following => handles(&api.fetch_following(account).await),
            ListKind::ToFollow | ListKind::ToUnfollow => {
                let followers = api.fetch_followers(account).await;
                let following = api.fetch_following(account).await;
                if kind == ListKind::ToFollow {
                    compute_to_follow(&followers, &following)
                } else {
                    compute_to_unfollow(&following, &followers)
                }
            }
        }
    });

    if json {
        println!("{}", serde_json::to_string(&list)?);
        return Ok(());
    }

    if list.is_empty() {
        println!("{}", "No accounts.".dimmed());
        return Ok(());
    }
    let width = list.len().to_string().len();
    for (i, handle) in list.iter().enumerate() {
        println!("{:>width$}. {handle}", i + 1);
    }
    Ok(())
}
