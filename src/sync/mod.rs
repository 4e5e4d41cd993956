//! Resumable reconciliation.
//!
//! [`SyncController`] runs one pass of the mutual-follow policy:
//!
//! 1. **Resume or discover**: reuse a persisted checkpoint, or fetch both
//!    relationship sets and compute the two mutation lists.
//! 2. **Unfollow phase**: work through accounts not following back.
//! 3. **Follow phase**: work through followers not followed back.
//! 4. **Finish**: delete the checkpoint, or save it if the time budget ran
//!    out first.
//!
//! # Example
//!
//! ```ignore
//! use followsync::api::GitHubClient;
//! use followsync::checkpoint::FileCheckpointStore;
//! use followsync::pacing::FixedDelay;
//! use followsync::sync::SyncController;
//!
//! let api = GitHubClient::new(&settings)?;
//! let store = FileCheckpointStore::new(&settings.checkpoint_path);
//! let pacer = FixedDelay(settings.delay);
//!
//! let mut controller = SyncController::new(settings, api, store, pacer);
//! let outcome = controller.run().await?;
//! if !outcome.completed() {
//!     println!("Interrupted; run again to continue.");
//! }
//! ```

mod controller;
mod deadline;
mod outcome;

pub use controller::SyncController;
pub use deadline::Deadline;
pub use outcome::{SyncOutcome, SyncStatus};
