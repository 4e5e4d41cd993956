//! Checkpoint model.
//!
//! A checkpoint freezes the reconciliation decision (both mutation lists)
//! together with the cursor into each list. The JSON layout is the one
//! the checkpoint file has always used:
//!
//! ```json
//! {
//!   "lastStep": "unfollow",
//!   "unfollowIndex": 3,
//!   "followIndex": 0,
//!   "usersToUnfollow": ["d", "e", "f", "g"],
//!   "usersToFollow": ["a", "c"],
//!   "savedAt": "2025-01-20T10:00:00.000Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the batch-apply state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "unfollow")]
    Unfollowing,
    #[serde(rename = "follow")]
    Following,
    #[serde(rename = "completed")]
    Completed,
}

impl Phase {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unfollowing => "unfollow",
            Self::Following => "follow",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable snapshot of an in-progress reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    #[serde(rename = "lastStep")]
    pub phase: Phase,
    /// Next unprocessed position in `unfollow_list`.
    pub unfollow_index: usize,
    /// Next unprocessed position in `follow_list`.
    pub follow_index: usize,
    #[serde(rename = "usersToUnfollow")]
    pub unfollow_list: Vec<String>,
    #[serde(rename = "usersToFollow")]
    pub follow_list: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

impl Checkpoint {
    /// Fresh checkpoint at the start of the unfollow phase.
    #[must_use]
    pub fn new(unfollow_list: Vec<String>, follow_list: Vec<String>) -> Self {
        Self {
            phase: Phase::Unfollowing,
            unfollow_index: 0,
            follow_index: 0,
            unfollow_list,
            follow_list,
            saved_at: Utc::now(),
        }
    }

    /// Refresh `saved_at`. Called right before every save.
    pub fn touch(&mut self) {
        self.saved_at = Utc::now();
    }

    /// Both lists are empty: nothing to reconcile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unfollow_list.is_empty() && self.follow_list.is_empty()
    }

    /// Check the cursor invariants.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.unfollow_index > self.unfollow_list.len() {
            return Err(format!(
                "unfollowIndex {} exceeds list length {}",
                self.unfollow_index,
                self.unfollow_list.len()
            ));
        }
        if self.follow_index > self.follow_list.len() {
            return Err(format!(
                "followIndex {} exceeds list length {}",
                self.follow_index,
                self.follow_list.len()
            ));
        }
        match self.phase {
            Phase::Unfollowing if self.follow_index != 0 => Err(format!(
                "followIndex is {} during the unfollow phase",
                self.follow_index
            )),
            Phase::Completed
                if self.unfollow_index != self.unfollow_list.len()
                    || self.follow_index != self.follow_list.len() =>
            {
                Err("completed checkpoint with unprocessed entries".to_string())
            }
            _ => Ok(()),
        }
    }
}
