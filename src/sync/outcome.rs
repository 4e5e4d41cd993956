//! Result of one reconciliation pass.

use serde::Serialize;

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Discovery found nothing to change.
    UpToDate,
    /// Both lists were worked through; the checkpoint is gone.
    Completed,
    /// The time budget ran out; a checkpoint was persisted for the next run.
    Interrupted,
}

/// Aggregate counts for the current invocation.
///
/// Counts are confirmed mutations only. Failed calls advance the cursor
/// but are not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub unfollowed_count: usize,
    pub followed_count: usize,
    pub status: SyncStatus,
    /// Whether this pass continued from a persisted checkpoint.
    pub resumed: bool,
    /// Whether the interrupted position reached the checkpoint store.
    /// Always `false` unless the status is `Interrupted`.
    pub checkpoint_saved: bool,
}

impl SyncOutcome {
    pub(crate) fn up_to_date() -> Self {
        Self {
            unfollowed_count: 0,
            followed_count: 0,
            status: SyncStatus::UpToDate,
            resumed: false,
            checkpoint_saved: false,
        }
    }

    /// `false` only when the pass was interrupted and must be resumed.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.status != SyncStatus::Interrupted
    }
}
