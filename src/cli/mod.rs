//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::api::Mutation;
use crate::config::ConfigOverrides;

pub mod commands;

/// followsync - keep your GitHub following in line with your followers
#[derive(Parser, Debug)]
#[command(name = "followsync", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub token used as the bearer credential
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Account whose relationships are reconciled
    #[arg(long, global = true, env = "GITHUB_USERNAME")]
    pub account: Option<String>,

    /// API base URL (default: https://api.github.com)
    #[arg(long, global = true, env = "FOLLOWSYNC_API_URL")]
    pub api_url: Option<String>,

    /// Accounts per page when listing relationships (1-100)
    #[arg(long, global = true, env = "FOLLOWSYNC_PAGE_SIZE")]
    pub page_size: Option<usize>,

    /// Pause after every follow/unfollow call, in milliseconds
    #[arg(long, global = true, env = "RATELIMIT_WAIT_MS")]
    pub delay_ms: Option<u64>,

    /// Time budget for one run, in milliseconds
    #[arg(long, global = true, env = "TIMEOVER_MS")]
    pub time_budget_ms: Option<u64>,

    /// Checkpoint file (default: ./savedata.json)
    #[arg(long, global = true, env = "FOLLOWSYNC_CHECKPOINT")]
    pub checkpoint: Option<PathBuf>,

    /// Config file (default: ~/.followsync/config.json)
    #[arg(long, global = true, env = "FOLLOWSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (default: text on a terminal, JSON otherwise)
    #[arg(long, value_enum, global = true, conflicts_with = "json")]
    pub format: Option<OutputFormat>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Whether results are printed as JSON.
    ///
    /// An explicit `--format` wins; otherwise `--json` or a non-terminal
    /// stdout selects JSON.
    #[must_use]
    pub fn json_output(&self, stdout_is_terminal: bool) -> bool {
        match self.format {
            Some(OutputFormat::Json) => true,
            Some(OutputFormat::Text) => false,
            None => self.json || !stdout_is_terminal,
        }
    }

    /// Configuration values taken from flags and their environment fallbacks.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            token: self.token.clone(),
            account: self.account.clone(),
            api_url: self.api_url.clone(),
            page_size: self.page_size,
            delay_ms: self.delay_ms,
            time_budget_ms: self.time_budget_ms,
            checkpoint: self.checkpoint.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Unfollow non-mutual accounts, then follow back followers (resumable)
    Sync {
        /// Abort if either relationship set cannot be fetched completely
        #[arg(long)]
        strict: bool,

        /// Show what would change without mutating or touching the checkpoint
        #[arg(long)]
        dry_run: bool,

        /// Run a single direction only
        #[arg(long, value_enum)]
        only: Option<Direction>,
    },

    /// Show follower/following counts and the pending differences
    Status,

    /// Print a full relationship or difference list
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },

    /// Follow a single account
    Follow {
        /// Handle to follow
        handle: String,
    },

    /// Unfollow a single account
    Unfollow {
        /// Handle to unfollow
        handle: String,
    },

    /// Inspect or discard the saved checkpoint
    Checkpoint {
        #[command(subcommand)]
        command: CheckpointCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum CheckpointCommands {
    /// Print the saved checkpoint
    Show,
    /// Delete the saved checkpoint
    Clear,
}

/// One side of a sync pass.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Follow back followers only
    Follow,
    /// Unfollow accounts that do not follow back only
    Unfollow,
}

impl From<Direction> for Mutation {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Follow => Mutation::Follow,
            Direction::Unfollow => Mutation::Unfollow,
        }
    }
}

/// Lists available to `followsync list`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Accounts following you
    Followers,
    /// Accounts you follow
    Following,
    /// Followers you do not follow back
    ToFollow,
    /// Accounts you follow that do not follow you back
    ToUnfollow,
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
