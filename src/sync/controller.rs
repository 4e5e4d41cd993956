//! Reconciliation state machine.
//!
//! ```text
//!   no usable checkpoint          checkpoint (unfollow | follow)
//!            │                               │
//!            ▼                               │
//!      Discovering ── nothing to do ──► UpToDate
//!            │                               │
//!            ▼                               ▼
//!      Unfollowing ───────────────────► Following ──► Completed
//!            │                               │        (checkpoint deleted)
//!            └──── deadline ──► Interrupted ◄┘
//!                               (checkpoint saved)
//! ```
//!
//! Every iteration checks the deadline first, then applies exactly one
//! mutation, advances the cursor by one whatever the result, and pauses.
//! Mutation lists are frozen at discovery; a resumed run never recomputes
//! them.

use tracing::{debug, info, warn};

use super::deadline::Deadline;
use super::outcome::{SyncOutcome, SyncStatus};
use crate::api::{Mutation, MutationExecutor, RelationshipSource};
use crate::checkpoint::CheckpointStore;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::model::{Checkpoint, Phase};
use crate::pacing::Pacer;
use crate::reconcile::Plan;

/// How a phase loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseEnd {
    Exhausted,
    Interrupted,
}

/// Drives one reconciliation pass.
pub struct SyncController<A, C, P> {
    settings: Settings,
    api: A,
    store: C,
    pacer: P,
    only: Option<Mutation>,
}

impl<A, C, P> SyncController<A, C, P>
where
    A: RelationshipSource + MutationExecutor,
    C: CheckpointStore,
    P: Pacer,
{
    pub fn new(settings: Settings, api: A, store: C, pacer: P) -> Self {
        Self {
            settings,
            api,
            store,
            pacer,
            only: None,
        }
    }

    /// Restrict a fresh pass to one direction.
    ///
    /// The other mutation list is left empty, so an interrupted
    /// one-direction pass resumes like any other checkpoint.
    #[must_use]
    pub fn only(mut self, direction: Option<Mutation>) -> Self {
        self.only = direction;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    /// Run one reconciliation pass.
    ///
    /// The time budget starts now and is not shared with earlier runs.
    ///
    /// # Errors
    ///
    /// With strict discovery enabled, when a relationship fetch fails.
    /// A one-direction pass also refuses to start over a resumable
    /// checkpoint. Every other fault is absorbed.
    pub async fn run(&mut self) -> Result<SyncOutcome> {
        let deadline = Deadline::start(self.settings.time_budget);

        let (mut checkpoint, resumed) = match self.resume_point() {
            Some(_) if self.only.is_some() => {
                return Err(Error::InvalidArgument(
                    "an interrupted sync is pending; finish it before a one-direction run".into(),
                ));
            }
            Some(checkpoint) => (checkpoint, true),
            None => {
                let mut plan = self.discover().await?;
                plan.restrict_to(self.only);
                if plan.is_empty() {
                    info!(account = %self.settings.account, "Already in sync, nothing to do");
                    return Ok(SyncOutcome::up_to_date());
                }
                (Checkpoint::new(plan.to_unfollow, plan.to_follow), false)
            }
        };

        let mut outcome = SyncOutcome {
            unfollowed_count: 0,
            followed_count: 0,
            status: SyncStatus::Completed,
            resumed,
            checkpoint_saved: false,
        };

        if checkpoint.phase == Phase::Unfollowing {
            let end = self
                .apply_phase(&mut checkpoint, &deadline, &mut outcome.unfollowed_count)
                .await;
            if end == PhaseEnd::Interrupted {
                outcome.checkpoint_saved = self.persist(&mut checkpoint);
                outcome.status = SyncStatus::Interrupted;
                return Ok(outcome);
            }
            checkpoint.phase = Phase::Following;
        }

        if checkpoint.phase == Phase::Following {
            let end = self
                .apply_phase(&mut checkpoint, &deadline, &mut outcome.followed_count)
                .await;
            if end == PhaseEnd::Interrupted {
                outcome.checkpoint_saved = self.persist(&mut checkpoint);
                outcome.status = SyncStatus::Interrupted;
                return Ok(outcome);
            }
        }

        checkpoint.phase = Phase::Completed;
        checkpoint.unfollow_index = checkpoint.unfollow_list.len();
        checkpoint.follow_index = checkpoint.follow_list.len();
        self.clear(&mut checkpoint);

        info!(
            unfollowed = outcome.unfollowed_count,
            followed = outcome.followed_count,
            "Reconciliation complete"
        );
        Ok(outcome)
    }

    /// Load a checkpoint worth resuming, if any.
    ///
    /// Unreadable, inconsistent and completed records all count as absent.
    fn resume_point(&mut self) -> Option<Checkpoint> {
        if !self.store.has() {
            return None;
        }

        let checkpoint = match self.store.load() {
            Ok(Some(checkpoint)) => checkpoint,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Checkpoint unreadable, starting a fresh reconciliation");
                return None;
            }
        };

        if checkpoint.phase == Phase::Completed {
            info!(saved_at = %checkpoint.saved_at, "Discarding completed checkpoint from an earlier run");
            if let Err(e) = self.store.delete() {
                warn!(error = %e, "Failed to delete completed checkpoint");
            }
            return None;
        }

        if let Err(reason) = checkpoint.validate() {
            warn!(%reason, "Checkpoint inconsistent, starting a fresh reconciliation");
            return None;
        }

        info!(
            phase = %checkpoint.phase,
            unfollow = %format!("{}/{}", checkpoint.unfollow_index, checkpoint.unfollow_list.len()),
            follow = %format!("{}/{}", checkpoint.follow_index, checkpoint.follow_list.len()),
            saved_at = %checkpoint.saved_at,
            "Resuming from checkpoint"
        );
        Some(checkpoint)
    }

    /// Fetch both relationship sets and reconcile them.
    async fn discover(&self) -> Result<Plan> {
        let account = self.settings.account.as_str();

        let (followers, following) = if self.settings.strict_discovery {
            let followers = self
                .api
                .try_fetch_followers(account)
                .await
                .map_err(|e| Error::Discovery(e.to_string()))?;
            let following = self
                .api
                .try_fetch_following(account)
                .await
                .map_err(|e| Error::Discovery(e.to_string()))?;
            (followers, following)
        } else {
            (
                self.api.fetch_followers(account).await,
                self.api.fetch_following(account).await,
            )
        };

        let plan = Plan::new(&followers, &following);
        info!(
            account,
            followers = followers.len(),
            following = following.len(),
            to_unfollow = plan.to_unfollow.len(),
            to_follow = plan.to_follow.len(),
            "Discovery complete"
        );
        Ok(plan)
    }

    /// Work through the list of the current phase from its cursor.
    async fn apply_phase(
        &self,
        checkpoint: &mut Checkpoint,
        deadline: &Deadline,
        succeeded: &mut usize,
    ) -> PhaseEnd {
        let (mutation, list, index) = match checkpoint.phase {
            Phase::Unfollowing => (
                Mutation::Unfollow,
                &checkpoint.unfollow_list,
                &mut checkpoint.unfollow_index,
            ),
            Phase::Following => (
                Mutation::Follow,
                &checkpoint.follow_list,
                &mut checkpoint.follow_index,
            ),
            Phase::Completed => return PhaseEnd::Exhausted,
        };

        let total = list.len();
        info!(%mutation, start = *index, total, "Starting phase");

        while *index < total {
            if deadline.expired() {
                info!(%mutation, index = *index, total, "Time budget exhausted");
                return PhaseEnd::Interrupted;
            }

            let handle = &list[*index];
            if self.api.apply(mutation, handle).await {
                *succeeded += 1;
            } else {
                debug!(%mutation, handle = %handle, "Mutation failed, moving on");
            }
            *index += 1;
            self.pacer.pause().await;

            if *index % self.settings.progress_every.max(1) == 0 || *index == total {
                info!(
                    %mutation,
                    progress = %format!("{}/{total}", *index),
                    succeeded = *succeeded,
                    remaining_minutes = deadline.remaining().as_secs() / 60,
                    "Progress"
                );
            }
        }

        PhaseEnd::Exhausted
    }

    /// Save on interruption. Failure is reported through the return value
    /// and a warning, never raised.
    fn persist(&mut self, checkpoint: &mut Checkpoint) -> bool {
        checkpoint.touch();
        match self.store.save(checkpoint) {
            Ok(()) => {
                info!(
                    phase = %checkpoint.phase,
                    unfollow_index = checkpoint.unfollow_index,
                    follow_index = checkpoint.follow_index,
                    "Checkpoint saved, the next run resumes here"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to save checkpoint, progress of this run is lost");
                false
            }
        }
    }

    /// Remove the checkpoint after completion.
    ///
    /// If removal fails, try to leave a completed record instead, which the
    /// next run discards rather than resumes.
    fn clear(&mut self, checkpoint: &mut Checkpoint) {
        if let Err(e) = self.store.delete() {
            warn!(error = %e, "Failed to delete checkpoint, marking it completed");
            checkpoint.touch();
            if let Err(e) = self.store.save(checkpoint) {
                warn!(error = %e, "Failed to mark checkpoint completed");
            }
        }
    }
}
