//! followsync - mutual-follow reconciliation for GitHub accounts
//!
//! Follows back every follower, unfollows every account that does not
//! follow back, and survives interruption: progress is checkpointed when
//! the per-run time budget runs out and the next run picks up where the
//! last one stopped.
//!
//! # Architecture
//!
//! - [`api`] - Relationship source / mutation executor traits and the GitHub client
//! - [`reconcile`] - Pure set differences (to-follow, to-unfollow)
//! - [`checkpoint`] - Checkpoint store capability with file and memory backends
//! - [`pacing`] - Delay strategy between mutation calls
//! - [`sync`] - The resumable reconciliation state machine
//! - [`model`] - Data types (Account, Checkpoint)
//! - [`config`] - Settings resolution
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pacing;
pub mod reconcile;
pub mod sync;

pub use error::{Error, Result};
