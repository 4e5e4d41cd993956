//! Data models for followsync.
//!
//! - [`Account`]: an entity in the relationship graph, keyed by handle
//! - [`Checkpoint`]: durable progress of one multi-run reconciliation

pub mod account;
pub mod checkpoint;

pub use account::{handles, is_valid_handle, Account};
pub use checkpoint::{Checkpoint, Phase};
