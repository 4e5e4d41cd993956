//! Single-account follow and unfollow.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use super::{resolve_settings, runtime};
use crate::api::{GitHubClient, Mutation, MutationExecutor};
use crate::config::ConfigOverrides;
use crate::error::{Error, Result};
use crate::model::is_valid_handle;

#[derive(Serialize)]
struct MutateOutput<'a> {
    action: String,
    handle: &'a str,
    success: bool,
}

/// Follow or unfollow one account.
///
/// # Errors
///
/// Returns `Error::Api` when the call is not confirmed with `204 No Content`.
pub fn execute(
    mutation: Mutation,
    handle: &str,
    overrides: &ConfigOverrides,
    config_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let handle = handle.trim();
    if !is_valid_handle(handle) {
        return Err(Error::InvalidArgument(format!(
            "{handle:?} is not a valid handle"
        )));
    }

    let settings = resolve_settings(overrides, config_path)?;
    let api = GitHubClient::new(&settings)?;

    let ok = runtime()?.block_on(api.apply(mutation, handle));
    if !ok {
        return Err(Error::Api(format!("Could not {mutation} {handle}")));
    }

    if json {
        let output = MutateOutput {
            action: mutation.to_string(),
            handle,
            success: true,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let verb = match mutation {
            Mutation::Follow => "Followed",
            Mutation::Unfollow => "Unfollowed",
        };
        println!("{} {verb} {}", "✓".green(), handle.bold());
    }
    Ok(())
}
